//! Display implementations for plans and tasks.
//!
//! Output is markdown: a plan is a heading with metadata bullets, each
//! top-level task a sub-heading, and subtasks an indented bullet list.

use std::fmt;

use super::datetime::{DueDate, LocalDateTime};
use crate::models::{Plan, PlanDraft, Task, TaskStatus};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.goal)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- User: {}", self.user_id)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this plan.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;

        if !self.id.is_empty() {
            writeln!(f, "- ID: {}", self.id)?;
        }
        if let Some(deadline) = &self.deadline {
            writeln!(f, "- Due: {}", DueDate(deadline))?;
        }
        if !self.id.is_empty() || self.deadline.is_some() {
            writeln!(f)?;
        }

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        if !self.subtasks.is_empty() {
            write_subtasks(f, &self.subtasks, 0)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

fn write_subtasks(f: &mut fmt::Formatter<'_>, tasks: &[Task], depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for task in tasks {
        write!(f, "{indent}- {} ({})", task.title, task.status.with_icon())?;
        if let Some(deadline) = &task.deadline {
            write!(f, ", due {}", DueDate(deadline))?;
        }
        if !task.id.is_empty() {
            write!(f, " `{}`", task.id)?;
        }
        writeln!(f)?;
        write_subtasks(f, &task.subtasks, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for PlanDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Draft: {}", self.goal)?;
        writeln!(f)?;

        if self.tasks.is_empty() {
            return writeln!(f, "No tasks could be drafted.");
        }

        for (index, task) in self.tasks.iter().enumerate() {
            write!(f, "{}. {}", index + 1, task.title)?;
            if let Some(deadline) = &task.deadline {
                write!(f, " (due {})", DueDate(deadline))?;
            }
            writeln!(f)?;
            if !task.description.is_empty() {
                writeln!(f, "   {}", task.description)?;
            }
        }
        Ok(())
    }
}
