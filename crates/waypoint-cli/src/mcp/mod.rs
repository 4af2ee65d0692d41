//! MCP server implementation for Waypoint
//!
//! Exposes the command surface and the individual planner operations as MCP
//! tools over stdio, so an AI assistant can manage a user's plans.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use waypoint_core::Planner;

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddSubtasks, AnalyzeRisks, ConfirmPlan, DraftPlan, GetProgress, Id, ListPlans, McpHandlers,
    McpResult, ProgressInput, RunTool, UpdateTaskStatus, UserMessage,
};

/// MCP server for Waypoint
#[derive(Clone)]
pub struct WaypointMcpServer {
    handlers: McpHandlers,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            handlers: McpHandlers::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "handle_command",
        description = "Interpret a free-text message from a user and run the matching tool. Messages about being behind shift the plan's deadlines by the number of days mentioned, messages about risk list tasks due within 3 days, 'faster' asks for alternative strategies, progress or feedback requests return motivational feedback, anything else is answered as a general question using the user's plans as context."
    )]
    async fn handle_command(&self, params: Parameters<UserMessage>) -> McpResult {
        self.handlers.handle_command(params).await
    }

    #[tool(
        name = "run_tool",
        description = "Run one tool directly, given its wire name and a JSON params object. Tools: reschedule_plan {user_id, message}, analyze_risks {user_id, threshold_days?}, generate_alternative_plans {user_id}, get_user_progress {user_id, plan_id?, message?}, provide_feedback {progress_data: {goal, completion_percentage, total_tasks, completed_tasks}}, handle_general_query {user_id, message}. Returns the tool's JSON result."
    )]
    async fn run_tool(&self, params: Parameters<RunTool>) -> McpResult {
        self.handlers.run_tool(params).await
    }

    #[tool(
        name = "analyze_risks",
        description = "List the user's tasks, at any depth and across all plans, whose deadline is within threshold_days (default 3) or already past, soonest first."
    )]
    async fn analyze_risks(&self, params: Parameters<AnalyzeRisks>) -> McpResult {
        self.handlers.analyze_risks(params).await
    }

    #[tool(
        name = "get_user_progress",
        description = "Completion statistics over the whole task tree of one plan. Pick the plan by plan_id, or by a message naming the goal; defaults to the user's first plan."
    )]
    async fn get_user_progress(&self, params: Parameters<GetProgress>) -> McpResult {
        self.handlers.get_user_progress(params).await
    }

    #[tool(
        name = "provide_feedback",
        description = "Motivational feedback (tone, message, suggestion) for the given completion percentage and task counts."
    )]
    async fn provide_feedback(&self, params: Parameters<ProgressInput>) -> McpResult {
        self.handlers.provide_feedback(params)
    }

    #[tool(
        name = "reschedule_plan",
        description = "Shift every top-level deadline of the plan a message refers to by the number of days in the message, e.g. 'I'm 3 days behind on my blog'. Subtask deadlines are left unchanged."
    )]
    async fn reschedule_plan(&self, params: Parameters<UserMessage>) -> McpResult {
        self.handlers.reschedule_plan(params).await
    }

    #[tool(
        name = "draft_plan",
        description = "Draft tasks for a goal with the language model, due by an optional deadline (YYYY-MM-DD, default in 14 days). Deadlines avoid dates on which the user already has at-risk tasks. Nothing is saved; review the draft and pass it to confirm_plan."
    )]
    async fn draft_plan(&self, params: Parameters<DraftPlan>) -> McpResult {
        self.handlers.draft_plan(params).await
    }

    #[tool(
        name = "confirm_plan",
        description = "Save a plan for a user: a goal plus top-level tasks, each with title, optional description, deadline (YYYY-MM-DD), status and nested subtasks. Task IDs are assigned automatically."
    )]
    async fn confirm_plan(&self, params: Parameters<ConfirmPlan>) -> McpResult {
        self.handlers.confirm_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List a user's plans, oldest first, with their task trees, task IDs and completion counts."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers.list_plans(params).await
    }

    #[tool(
        name = "get_task_details",
        description = "Show one task, found at any depth by its ID, with its status, deadline, description and subtasks."
    )]
    async fn get_task_details(&self, params: Parameters<Id>) -> McpResult {
        self.handlers.get_task_details(params).await
    }

    #[tool(
        name = "update_task_status",
        description = "Set the status of a task at any depth. Known statuses are Pending, InProgress and Completed; any other label is stored as given."
    )]
    async fn update_task_status(&self, params: Parameters<UpdateTaskStatus>) -> McpResult {
        self.handlers.update_task_status(params).await
    }

    #[tool(
        name = "add_subtasks",
        description = "Append subtasks, in order, under a task of a plan. The task must belong to the given plan."
    )]
    async fn add_subtasks(&self, params: Parameters<AddSubtasks>) -> McpResult {
        self.handlers.add_subtasks(params).await
    }

    #[tool(
        name = "refine_task",
        description = "Suggest subtasks for a task with the language model. Suggestions are not saved; pass the ones to keep to add_subtasks."
    )]
    async fn refine_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers.refine_task(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Waypoint is a smart task planner. Each user has plans; a plan is a goal with a tree of tasks that have deadlines and statuses.

## Workflow
1. `draft_plan` to get suggested tasks for a goal, then `confirm_plan` to save them (edited as needed)
2. `list_plans` and `get_task_details` to look around
3. `update_task_status` as work progresses; `refine_task` plus `add_subtasks` to break work down
4. `handle_command` for free-text requests such as "I'm 2 days behind on the blog" or "what's at risk?"

## Analytics
- `analyze_risks`: tasks due soon or overdue
- `get_user_progress` and `provide_feedback`: completion and encouragement
- `reschedule_plan`: shift a plan's top-level deadlines
- `run_tool`: any tool by wire name, returning JSON"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waypoint MCP server on stdio");
    debug!("Server created with {} tools", server.tool_router.list_all().len());

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
