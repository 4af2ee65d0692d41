//! Task model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TaskStatus;

/// A unit of work inside a plan. Tasks own their subtasks exclusively, so a
/// plan's tasks form a tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier, empty until the task is first persisted
    #[serde(default)]
    pub id: String,

    /// Brief title of the task
    pub title: String,

    /// Detailed description of the task
    #[serde(default)]
    pub description: String,

    /// Current status of the task
    #[serde(default)]
    pub status: TaskStatus,

    /// Deadline of the task (UTC), `None` when unset
    #[serde(default)]
    pub deadline: Option<Timestamp>,

    /// Nested subtasks, in order
    #[serde(default)]
    pub subtasks: Vec<Task>,
}

impl Task {
    /// Creates a pending task without a deadline or subtasks.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Pending,
            deadline: None,
            subtasks: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Appends a subtask.
    pub fn with_subtask(mut self, subtask: Task) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Assigns a fresh identifier to this task and every descendant that
    /// does not have one yet.
    pub fn assign_ids(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::now_v7().to_string();
        }
        for subtask in &mut self.subtasks {
            subtask.assign_ids();
        }
    }
}
