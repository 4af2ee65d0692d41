//! Display implementations for tool results and command outcomes.

use std::fmt;

use super::datetime::DueDate;
use crate::{
    command::CommandOutcome,
    models::{AlternativePlans, Feedback, ProgressSummary, QueryAnswer, RescheduleResult, RiskReport},
    tools::ToolOutput,
};

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## At-risk tasks (due within {} days)", self.threshold_days)?;
        writeln!(f)?;

        if self.risks.is_empty() {
            return writeln!(f, "No tasks at risk.");
        }

        for item in &self.risks {
            let when = match item.days_left {
                d if d < 0 => format!("overdue by {} days", -d),
                0 => "due today".to_string(),
                1 => "1 day left".to_string(),
                d => format!("{d} days left"),
            };
            writeln!(f, "- **{}** ({}): {}, {when}", item.task_name, item.goal, item.deadline)?;
        }
        Ok(())
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Progress: {}", self.goal)?;
        writeln!(f)?;
        writeln!(
            f,
            "{}% complete ({}/{} tasks)",
            self.completion_percentage, self.completed_tasks, self.total_tasks
        )
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.tone)?;
        writeln!(f)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        writeln!(f, "*{}*", self.suggestion)?;
        writeln!(f)?;

        let summary = &self.progress_summary;
        writeln!(
            f,
            "- {}%: {} done, {} remaining of {}",
            summary.completion_percentage, summary.completed_tasks, summary.remaining_tasks, summary.total_tasks
        )
    }
}

impl fmt::Display for RescheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        for task in &self.tasks {
            match &task.deadline {
                Some(deadline) => writeln!(f, "- {}: {}", task.title, DueDate(deadline))?,
                None => writeln!(f, "- {}: no deadline", task.title)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for AlternativePlans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for goal in &self.goals {
            writeln!(f, "## {}", goal.goal)?;
            writeln!(f)?;
            for option in &goal.options {
                writeln!(f, "- **{}**: {}", option.kind, option.description)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for QueryAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.response)
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::Reschedule(result) => write!(f, "{result}"),
            ToolOutput::Risks(report) => write!(f, "{report}"),
            ToolOutput::Alternatives(plans) => write!(f, "{plans}"),
            ToolOutput::Progress(summary) => write!(f, "{summary}"),
            ToolOutput::Feedback { feedback } => write!(f, "{feedback}"),
            ToolOutput::Answer(answer) => write!(f, "{answer}"),
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Feedback { feedback } => write!(f, "{feedback}"),
            CommandOutcome::Action { result, .. } => write!(f, "{result}"),
        }
    }
}
