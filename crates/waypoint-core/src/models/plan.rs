//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Task;

/// A user's goal together with its tree of tasks. The plan is the unit of
/// persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: String,

    /// Identifier of the owning user
    pub user_id: String,

    /// Goal the plan works towards
    pub goal: String,

    /// Top-level tasks, in order
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}
