//! Collection wrapper types for displaying groups of plans and tasks.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::{
    models::{Plan, Task},
    tools::progress,
};

/// Newtype wrapper listing plans as one compact section each, with their
/// completion counts over the whole task tree.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use waypoint_core::{display::Plans, models::{Plan, Task}};
///
/// let plan = Plan {
///     id: "0192".to_string(),
///     user_id: "alice".to_string(),
///     goal: "Launch blog".to_string(),
///     tasks: vec![Task::new("Write").with_subtask(Task::new("Outline"))],
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = Plans(vec![plan]).to_string();
/// assert!(output.contains("## Launch blog (0/2)"));
/// ```
pub struct Plans(pub Vec<Plan>);

impl Plans {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plans.
    pub fn iter(&self) -> std::slice::Iter<'_, Plan> {
        self.0.iter()
    }
}

impl Index<usize> for Plans {
    type Output = Plan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Plans {
    type Item = Plan;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in &self.0 {
            let summary = progress::aggregate(&plan.user_id, plan);
            writeln!(
                f,
                "## {} ({}/{})",
                plan.goal, summary.completed_tasks, summary.total_tasks
            )?;
            writeln!(f)?;
            writeln!(f, "- **ID**: {}", plan.id)?;
            writeln!(f, "- **Created**: {}", LocalDateTime(&plan.created_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a list of tasks, such as suggested
/// subtasks.
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}
