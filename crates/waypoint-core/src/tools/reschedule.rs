//! Shifting a plan's deadlines after the user reports a delay.

use std::sync::OnceLock;

use jiff::SignedDuration;
use log::{debug, info};
use regex::Regex;

use crate::{
    error::{PlannerError, Result},
    llm::TextGenerator,
    models::{RescheduleResult, Task},
    store::PlanStore,
};

fn delay_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)(-?)(\d+)\s*day").expect("delay pattern is valid"))
}

/// The first `<n> day(s)` in the message. A `-` directly before the number
/// is a sign only at the start of the message or after whitespace, so
/// "3-5 days" reads as 5. Zero and out-of-range counts are treated as absent.
pub fn extract_delay_days(message: &str) -> Option<i64> {
    let caps = delay_pattern().captures(message)?;
    let days = caps[2].parse::<i64>().ok()?;

    let sign = caps.get(1).filter(|m| !m.is_empty());
    let negative = sign.is_some_and(|m| {
        message[..m.start()]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace)
    });

    Some(if negative { -days } else { days }).filter(|days| *days != 0)
}

/// Moves every top-level deadline by `days` whole days. Unset deadlines and
/// subtasks are left alone.
pub fn shift_top_level(tasks: &mut [Task], days: i64) -> Result<()> {
    let delta = days
        .checked_mul(24)
        .map(SignedDuration::from_hours)
        .ok_or_else(|| PlannerError::invalid_input("message").with_reason(format!("delay of {days} days is out of range")))?;

    for task in tasks.iter_mut() {
        if let Some(deadline) = task.deadline {
            let shifted = deadline.checked_add(delta).map_err(|e| {
                PlannerError::invalid_input("message").with_reason(format!("cannot shift '{}': {e}", task.title))
            })?;
            task.deadline = Some(shifted);
        }
    }
    Ok(())
}

/// `reschedule_plan`: finds the plan the message refers to and pushes its
/// top-level deadlines back by the delay the message states.
pub async fn reschedule_plan(
    store: &dyn PlanStore,
    generator: &dyn TextGenerator,
    user_id: &str,
    message: &str,
) -> Result<RescheduleResult> {
    super::require("user_id", user_id)?;
    super::require("message", message)?;

    let delay = extract_delay_days(message).ok_or_else(|| PlannerError::NoDelayFound {
        message: message.to_string(),
    })?;

    let mut plan = super::matching::match_goal(store, generator, user_id, message).await?;
    debug!("reschedule_plan: shifting '{}' by {delay} days", plan.goal);

    shift_top_level(&mut plan.tasks, delay)?;
    let plan = store.update(plan).await?;
    info!("Rescheduled plan {} by {delay} days", plan.id);

    Ok(RescheduleResult {
        message: format!("All tasks for goal '{}' shifted by {delay} days", plan.goal),
        goal_id: plan.id,
        tasks: plan.tasks,
    })
}
