//! MCP tool handlers implementation

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use waypoint_core::{
    display::{CreateResult, Plans, Tasks, UpdateResult},
    params as core, Planner,
};

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types.
///
/// `#[serde(transparent)]` passes deserialization straight through to the
/// wrapped core type, and the schema is the core type's schema, so the core
/// params stay free of rmcp.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type UserMessage = McpParams<core::UserMessage>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type AnalyzeRisks = McpParams<core::AnalyzeRisks>;
pub type GetProgress = McpParams<core::GetProgress>;
pub type ProgressInput = McpParams<core::ProgressInput>;
pub type RunTool = McpParams<core::RunTool>;
pub type DraftPlan = McpParams<core::DraftPlan>;
pub type ConfirmPlan = McpParams<core::ConfirmPlan>;
pub type UpdateTaskStatus = McpParams<core::UpdateTaskStatus>;
pub type AddSubtasks = McpParams<core::AddSubtasks>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(markdown: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(markdown.to_string())]))
}

/// Handler implementations for the MCP server
#[derive(Clone)]
pub struct McpHandlers {
    planner: Planner,
}

impl McpHandlers {
    pub fn new(planner: Planner) -> Self {
        Self { planner }
    }

    pub async fn handle_command(&self, Parameters(params): Parameters<UserMessage>) -> McpResult {
        debug!("handle_command: {:?}", params);

        let outcome = self
            .planner
            .handle_command(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to handle command", &e))?;
        text(outcome)
    }

    pub async fn run_tool(&self, Parameters(params): Parameters<RunTool>) -> McpResult {
        debug!("run_tool: {:?}", params);

        let output = self
            .planner
            .run_tool(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to run tool", &e))?;
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| ErrorData::internal_error(format!("Failed to encode result: {e}"), None))?;
        text(json)
    }

    pub async fn analyze_risks(&self, Parameters(params): Parameters<AnalyzeRisks>) -> McpResult {
        debug!("analyze_risks: {:?}", params);

        let report = self
            .planner
            .analyze_risks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to analyze risks", &e))?;
        text(report)
    }

    pub async fn get_user_progress(&self, Parameters(params): Parameters<GetProgress>) -> McpResult {
        debug!("get_user_progress: {:?}", params);

        let summary = self
            .planner
            .get_user_progress(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get progress", &e))?;
        text(summary)
    }

    pub fn provide_feedback(&self, Parameters(params): Parameters<ProgressInput>) -> McpResult {
        debug!("provide_feedback: {:?}", params);
        text(self.planner.provide_feedback(params.as_ref()))
    }

    pub async fn reschedule_plan(&self, Parameters(params): Parameters<UserMessage>) -> McpResult {
        debug!("reschedule_plan: {:?}", params);

        let result = self
            .planner
            .reschedule_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reschedule plan", &e))?;
        text(result)
    }

    pub async fn draft_plan(&self, Parameters(params): Parameters<DraftPlan>) -> McpResult {
        debug!("draft_plan: {:?}", params);

        let draft = self
            .planner
            .draft_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to draft plan", &e))?;
        text(draft)
    }

    pub async fn confirm_plan(&self, Parameters(params): Parameters<ConfirmPlan>) -> McpResult {
        debug!("confirm_plan: {:?}", params);

        let plan = self
            .planner
            .confirm_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
        text(CreateResult::new(plan))
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {:?}", params);

        let plans = self
            .planner
            .list_plans(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if plans.is_empty() {
            return text("# No plans found\n");
        }
        let mut out = format!("# Plans\n\n{}", Plans(plans.clone()));
        for plan in &plans {
            out.push_str(&format!("\n{plan}"));
        }
        text(out)
    }

    pub async fn get_task_details(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_task_details: {:?}", params);

        let task = self
            .planner
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?;
        text(task)
    }

    pub async fn update_task_status(&self, Parameters(params): Parameters<UpdateTaskStatus>) -> McpResult {
        debug!("update_task_status: {:?}", params);

        let task = self
            .planner
            .update_task_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;
        let change = format!("Status set to {}", task.status);
        text(UpdateResult::with_changes(task, vec![change]))
    }

    pub async fn add_subtasks(&self, Parameters(params): Parameters<AddSubtasks>) -> McpResult {
        debug!("add_subtasks: {:?}", params);

        let inner = params.as_ref();
        let plan = self
            .planner
            .add_subtasks(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to add subtasks", &e))?;
        let change = format!("Added {} subtask(s) to {}", inner.subtasks.len(), inner.task_id);
        text(UpdateResult::with_changes(plan, vec![change]))
    }

    pub async fn refine_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("refine_task: {:?}", params);

        let subtasks = self
            .planner
            .refine_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to refine task", &e))?;
        text(format!("# Suggested subtasks\n\n{}", Tasks(subtasks)))
    }
}
