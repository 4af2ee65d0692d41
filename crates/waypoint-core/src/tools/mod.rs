//! The operations a command can be dispatched to.
//!
//! Each operation is a variant of [`Tool`] carrying typed parameters, so a
//! well-formed invocation cannot name an unknown tool or miss a parameter.
//! Loosely-typed invocations from the wire are decoded with
//! [`Tool::from_wire`] before they get here.
//!
//! The analytics themselves ([`risk::scan`], [`progress::aggregate`],
//! [`feedback::feedback`], [`reschedule::shift_top_level`]) are pure
//! functions over plans and can be used without a store.

use jiff::Timestamp;
use log::debug;
use serde::Serialize;

use crate::{
    error::{PlannerError, Result},
    llm::TextGenerator,
    models::{AlternativePlans, Feedback, ProgressSummary, QueryAnswer, RescheduleResult, RiskReport},
    store::PlanStore,
};

pub mod alternatives;
pub mod feedback;
pub mod matching;
pub mod progress;
pub mod query;
pub mod reschedule;
pub mod risk;
mod wire;

/// A fully-typed tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    /// Shift a plan's top-level deadlines by the delay stated in `message`
    ReschedulePlan { user_id: String, message: String },
    /// List tasks due within `threshold_days` (default 3) across all plans
    AnalyzeRisks {
        user_id: String,
        threshold_days: Option<i64>,
    },
    /// Strategy options for every plan
    GenerateAlternativePlans { user_id: String },
    /// Completion statistics for one plan
    GetUserProgress {
        user_id: String,
        plan_id: Option<String>,
        message: Option<String>,
    },
    /// Encouragement for a progress summary
    ProvideFeedback { progress: ProgressSummary },
    /// Free-form question answered by the text generator
    HandleGeneralQuery { user_id: String, message: String },
}

/// Result of running a [`Tool`]. Serializes as the bare result object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Reschedule(RescheduleResult),
    Risks(RiskReport),
    Alternatives(AlternativePlans),
    Progress(ProgressSummary),
    Feedback { feedback: Feedback },
    Answer(QueryAnswer),
}

/// Collaborators and clock a tool runs against.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub store: &'a dyn PlanStore,
    pub generator: &'a dyn TextGenerator,
    pub now: Timestamp,
}

impl Tool {
    /// Wire name of the tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::ReschedulePlan { .. } => "reschedule_plan",
            Tool::AnalyzeRisks { .. } => "analyze_risks",
            Tool::GenerateAlternativePlans { .. } => "generate_alternative_plans",
            Tool::GetUserProgress { .. } => "get_user_progress",
            Tool::ProvideFeedback { .. } => "provide_feedback",
            Tool::HandleGeneralQuery { .. } => "handle_general_query",
        }
    }

    /// Decodes a tool name and a JSON parameter object. Unknown names and
    /// missing or mistyped parameters are [`PlannerError::Dispatch`] errors.
    pub fn from_wire(name: &str, params: &serde_json::Value) -> Result<Self> {
        wire::decode(name, params)
    }

    /// Runs the tool.
    pub async fn run(self, ctx: ToolContext<'_>) -> Result<ToolOutput> {
        debug!("run: {}", self.name());

        let output = match self {
            Tool::ReschedulePlan { user_id, message } => ToolOutput::Reschedule(
                reschedule::reschedule_plan(ctx.store, ctx.generator, &user_id, &message).await?,
            ),
            Tool::AnalyzeRisks {
                user_id,
                threshold_days,
            } => ToolOutput::Risks(risk::analyze_risks(ctx.store, &user_id, threshold_days, ctx.now).await?),
            Tool::GenerateAlternativePlans { user_id } => {
                ToolOutput::Alternatives(alternatives::generate_alternative_plans(ctx.store, &user_id).await?)
            }
            Tool::GetUserProgress {
                user_id,
                plan_id,
                message,
            } => ToolOutput::Progress(
                progress::get_user_progress(
                    ctx.store,
                    ctx.generator,
                    &user_id,
                    plan_id.as_deref(),
                    message.as_deref(),
                )
                .await?,
            ),
            Tool::ProvideFeedback { progress } => ToolOutput::Feedback {
                feedback: feedback::feedback(&progress),
            },
            Tool::HandleGeneralQuery { user_id, message } => ToolOutput::Answer(
                query::handle_general_query(ctx.store, ctx.generator, &user_id, &message, ctx.now).await?,
            ),
        };

        Ok(output)
    }
}

/// Rejects empty or whitespace-only required parameters.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}
