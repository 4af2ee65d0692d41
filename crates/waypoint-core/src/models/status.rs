//! Task status enumeration.

use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

/// Status of a task.
///
/// The known labels are matched case-insensitively. Any other label is kept
/// verbatim in [`TaskStatus::Other`] so statuses written by other clients
/// survive a round trip through the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task has been completed
    Completed,

    /// Any label not known to this crate
    Other(String),
}

impl TaskStatus {
    /// Canonical string representation, as stored and serialized.
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Other(label) => label,
        }
    }

    /// Whether the task counts as done for progress purposes.
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> String {
        match self {
            TaskStatus::Completed => "✓ Completed".to_string(),
            TaskStatus::InProgress => "➤ In Progress".to_string(),
            TaskStatus::Pending => "○ Pending".to_string(),
            TaskStatus::Other(label) => format!("? {label}"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_lowercase().as_str() {
            "" | "pending" => TaskStatus::Pending,
            "inprogress" | "in_progress" | "in progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Other(trimmed.to_string()),
        })
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(value: &str) -> Self {
        TaskStatus::from(value.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        value.as_str().to_string()
    }
}
