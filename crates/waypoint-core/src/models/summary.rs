//! Derived, non-persistent reports computed from plans.

use serde::{Deserialize, Serialize};

use super::Task;

/// A task whose deadline is close or already past.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskItem {
    /// Goal of the plan the task belongs to
    pub goal: String,
    /// Title of the task
    pub task_name: String,
    /// Deadline as a `YYYY-MM-DD` date (UTC)
    pub deadline: String,
    /// Whole days until the deadline, negative when overdue
    pub days_left: i64,
}

/// Result of scanning every plan of a user for at-risk tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskReport {
    pub user_id: String,
    pub risks: Vec<RiskItem>,
    pub count: usize,
    pub threshold_days: i64,
}

/// Completion statistics over the whole task tree of one plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSummary {
    pub user_id: String,
    pub goal: String,
    /// `floor(100 * completed / total)`, 0 when the plan has no tasks
    pub completion_percentage: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
}

/// Encouragement derived from a [`ProgressSummary`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub tone: String,
    pub message: String,
    pub suggestion: String,
    pub progress_summary: FeedbackSummary,
}

/// Progress figures echoed back alongside feedback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackSummary {
    pub goal: String,
    pub completion_percentage: u32,
    pub completed_tasks: u32,
    pub remaining_tasks: u32,
    pub total_tasks: u32,
}

/// Result of rescheduling a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RescheduleResult {
    /// Human-readable confirmation
    pub message: String,
    pub goal_id: String,
    /// Updated top-level tasks
    pub tasks: Vec<Task>,
}

/// One way of approaching a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrategyOption {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Strategy options for one goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalAlternatives {
    pub goal_id: String,
    pub goal: String,
    pub options: Vec<StrategyOption>,
}

/// Strategy options for every goal of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlternativePlans {
    pub user_id: String,
    pub goals: Vec<GoalAlternatives>,
}

/// Answer to a free-form question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryAnswer {
    pub response: String,
    /// Whether the user's plans were given to the generator as context
    pub context_used: bool,
}

/// Unsaved tasks drafted for a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDraft {
    pub goal: String,
    pub tasks: Vec<Task>,
}
