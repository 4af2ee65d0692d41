//! Parameter structures for Waypoint operations.
//!
//! These are shared by every interface (CLI, MCP). Interface layers wrap them
//! with their own derives (clap `Args`, a transparent serde wrapper for MCP)
//! and convert into these types before calling the [`crate::Planner`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates travel as strings (`YYYY-MM-DD` or RFC 3339) and are parsed here,
//! so the JSON schema of every parameter stays plain.

use jiff::{civil::Date, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    draft::start_of_day,
    error::{PlannerError, Result},
    models::{Task, TaskStatus},
};

/// Parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan or task to operate on
    pub id: String,
}

/// A user and a free-text message from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UserMessage {
    /// Identifier of the user the message is from
    pub user_id: String,
    /// The message, e.g. "I'm 3 days behind on my blog"
    pub message: String,
}

/// Parameters for listing a user's plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Identifier of the user whose plans to list
    pub user_id: String,
}

/// Parameters for a risk scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AnalyzeRisks {
    /// Identifier of the user whose plans to scan
    pub user_id: String,
    /// Flag tasks due within this many days (default 3)
    #[serde(default)]
    pub threshold_days: Option<i64>,
}

/// Parameters for a progress report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GetProgress {
    /// Identifier of the user
    pub user_id: String,
    /// Report on this plan
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Otherwise report on the plan this text refers to (default: first plan)
    #[serde(default)]
    pub message: Option<String>,
}

/// Progress figures to derive feedback from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ProgressInput {
    /// Goal of the plan
    #[serde(default)]
    pub goal: String,
    /// Completion percentage, 0-100; a float or numeric string is truncated
    #[serde(deserialize_with = "lenient_count")]
    pub completion_percentage: u32,
    /// Number of tasks in the plan, all depths included
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_tasks: u32,
    /// Number of completed tasks
    #[serde(default, deserialize_with = "lenient_count")]
    pub completed_tasks: u32,
}

/// Non-negative integer given as an integer, float (truncated) or numeric
/// string.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    number
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("expected a non-negative number, got {value}")))
}

/// A tool invocation in wire form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RunTool {
    /// Tool name: reschedule_plan, analyze_risks, generate_alternative_plans,
    /// get_user_progress, provide_feedback or handle_general_query
    pub tool: String,
    /// Tool parameters as a JSON object
    #[serde(default)]
    pub params: Value,
}

/// Parameters for drafting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DraftPlan {
    /// Identifier of the user; their at-risk dates are avoided
    pub user_id: String,
    /// Goal to draft tasks for
    pub goal: String,
    /// Date the goal should be reached by (YYYY-MM-DD, default: in 14 days)
    #[serde(default)]
    pub deadline: Option<String>,
}

impl DraftPlan {
    /// The deadline as a calendar date, if one was given.
    pub fn deadline_date(&self) -> Result<Option<Date>> {
        self.deadline
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| {
                d.parse::<Date>()
                    .map_err(|e| PlannerError::invalid_input("deadline").with_reason(e.to_string()))
            })
            .transpose()
    }
}

/// A task as supplied by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskInput {
    /// Keep this ID (assigned automatically when absent)
    #[serde(default)]
    pub id: Option<String>,
    /// Brief title of the task
    pub title: String,
    /// Detailed description
    #[serde(default)]
    pub description: Option<String>,
    /// Status label (default Pending)
    #[serde(default)]
    pub status: Option<String>,
    /// Deadline, YYYY-MM-DD or an RFC 3339 timestamp
    #[serde(default)]
    pub deadline: Option<String>,
    /// Nested subtasks
    #[serde(default)]
    pub subtasks: Vec<TaskInput>,
}

impl TaskInput {
    /// Converts into a [`Task`] tree, validating titles and parsing
    /// deadlines.
    pub fn into_task(self) -> Result<Task> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("must not be empty"));
        }

        let deadline = self.deadline.as_deref().map(parse_deadline).transpose()?;
        let subtasks = self
            .subtasks
            .into_iter()
            .map(TaskInput::into_task)
            .collect::<Result<Vec<_>>>()?;

        Ok(Task {
            id: self.id.unwrap_or_default(),
            title,
            description: self.description.unwrap_or_default(),
            status: self.status.map(TaskStatus::from).unwrap_or_default(),
            deadline,
            subtasks,
        })
    }
}

impl From<Task> for TaskInput {
    fn from(task: Task) -> Self {
        Self {
            id: Some(task.id).filter(|id| !id.is_empty()),
            title: task.title,
            description: Some(task.description).filter(|d| !d.is_empty()),
            status: Some(task.status.as_str().to_string()),
            deadline: task.deadline.map(|d| d.to_string()),
            subtasks: task.subtasks.into_iter().map(Into::into).collect(),
        }
    }
}

fn parse_deadline(text: &str) -> Result<Timestamp> {
    let text = text.trim();
    if let Ok(timestamp) = text.parse::<Timestamp>() {
        return Ok(timestamp);
    }
    let date = text.parse::<Date>().map_err(|_| {
        PlannerError::invalid_input("deadline")
            .with_reason(format!("'{text}' is not a YYYY-MM-DD date or RFC 3339 timestamp"))
    })?;
    start_of_day(date)
}

/// Parameters for saving a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ConfirmPlan {
    /// Identifier of the owning user
    pub user_id: String,
    /// Goal of the plan
    pub goal: String,
    /// Top-level tasks, usually the output of draft_plan after review
    #[serde(default)]
    pub tasks: Vec<TaskInput>,
}

/// Parameters for changing a task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTaskStatus {
    /// ID of the task, at any depth
    pub task_id: String,
    /// New status: Pending, InProgress, Completed or any other label
    pub status: String,
}

/// Parameters for appending subtasks to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddSubtasks {
    /// ID of the plan that owns the task
    pub plan_id: String,
    /// ID of the parent task, at any depth
    pub task_id: String,
    /// Subtasks to append, in order
    pub subtasks: Vec<TaskInput>,
}
