//! Natural-language commands and the analytics tools.

use jiff::Timestamp;

use super::Planner;
use crate::{
    command::CommandOutcome,
    error::Result,
    models::{Feedback, ProgressSummary, RescheduleResult, RiskReport},
    params::{AnalyzeRisks, GetProgress, ProgressInput, RunTool, UserMessage},
    tools::{self, Tool, ToolOutput},
};

impl Planner {
    /// Interprets a free-text message and runs the matching tool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use waypoint_core::{params::UserMessage, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let outcome = planner
    ///     .handle_command(&UserMessage {
    ///         user_id: "alice".to_string(),
    ///         message: "I'm 2 days behind on the blog".to_string(),
    ///     })
    ///     .await?;
    /// # Result::<(), waypoint_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn handle_command(&self, params: &UserMessage) -> Result<CommandOutcome> {
        self.orchestrator.handle(&params.user_id, &params.message).await
    }

    /// Runs one tool given in wire form. Unknown tools and bad parameters
    /// are reported as dispatch errors.
    pub async fn run_tool(&self, params: &RunTool) -> Result<ToolOutput> {
        let tool = Tool::from_wire(&params.tool, &params.params)?;
        self.orchestrator.run_tool(tool, Timestamp::now()).await
    }

    /// Tasks due soon, or overdue, across all of the user's plans.
    pub async fn analyze_risks(&self, params: &AnalyzeRisks) -> Result<RiskReport> {
        tools::risk::analyze_risks(
            self.store.as_ref(),
            &params.user_id,
            params.threshold_days,
            Timestamp::now(),
        )
        .await
    }

    /// Completion statistics for one of the user's plans.
    pub async fn get_user_progress(&self, params: &GetProgress) -> Result<ProgressSummary> {
        tools::progress::get_user_progress(
            self.store.as_ref(),
            self.generator.as_ref(),
            &params.user_id,
            params.plan_id.as_deref(),
            params.message.as_deref(),
        )
        .await
    }

    /// Feedback for the given progress figures.
    pub fn provide_feedback(&self, params: &ProgressInput) -> Feedback {
        tools::feedback::feedback(&ProgressSummary {
            user_id: String::new(),
            goal: params.goal.clone(),
            completion_percentage: params.completion_percentage,
            total_tasks: params.total_tasks,
            completed_tasks: params.completed_tasks,
        })
    }

    /// Shifts the top-level deadlines of the plan the message refers to.
    pub async fn reschedule_plan(&self, params: &UserMessage) -> Result<RescheduleResult> {
        tools::reschedule::reschedule_plan(
            self.store.as_ref(),
            self.generator.as_ref(),
            &params.user_id,
            &params.message,
        )
        .await
    }
}
