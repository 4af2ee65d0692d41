//! Free-form questions answered with the user's plans as context.

use std::fmt::Write as _;

use jiff::Timestamp;
use log::debug;

use crate::{
    error::Result,
    llm::TextGenerator,
    models::{Plan, QueryAnswer, TaskStatus},
    store::PlanStore,
};

use super::{progress, risk};

/// Reply for users who have nothing planned yet.
pub const NO_PLANS_RESPONSE: &str =
    "You don't have any plans yet. Would you like to create one? Just tell me your goal!";

const UPCOMING_WINDOW_DAYS: i64 = 7;
const UPCOMING_LIMIT: usize = 3;

/// `handle_general_query`.
pub async fn handle_general_query(
    store: &dyn PlanStore,
    generator: &dyn TextGenerator,
    user_id: &str,
    message: &str,
    now: Timestamp,
) -> Result<QueryAnswer> {
    super::require("user_id", user_id)?;
    super::require("message", message)?;

    let plans = store.get_all_by_user(user_id).await?;
    if plans.is_empty() {
        return Ok(QueryAnswer {
            response: NO_PLANS_RESPONSE.to_string(),
            context_used: false,
        });
    }

    let context = plans_context(user_id, &plans, now);
    debug!("handle_general_query: {} plans, {} context chars", plans.len(), context.len());

    let prompt = format!(
        r#"You are a helpful task planning assistant. A user asked: "{message}"

Here's what you know about the user:
{context}

Provide a helpful, conversational response that:
1. Directly answers their question using the context above
2. Is encouraging and supportive
3. Suggests actionable next steps if relevant
4. Keep it concise (2-3 sentences max)

Response:"#
    );

    let response = generator.generate(&prompt).await?;
    Ok(QueryAnswer {
        response: response.trim().to_string(),
        context_used: true,
    })
}

/// One block per plan: goal, progress and up to three pending top-level
/// tasks due within the next week.
pub fn plans_context(user_id: &str, plans: &[Plan], now: Timestamp) -> String {
    let mut context = String::from("User's current plans:\n");

    for (index, plan) in plans.iter().enumerate() {
        let summary = progress::aggregate(user_id, plan);
        let _ = writeln!(context, "\n{}. Goal: {}", index + 1, plan.goal);
        let _ = writeln!(
            context,
            "   Progress: {}% ({}/{} tasks completed)",
            summary.completion_percentage, summary.completed_tasks, summary.total_tasks
        );

        let upcoming = plan
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Pending)
            .filter_map(|task| {
                let deadline = task.deadline.filter(|d| *d > now)?;
                let days_left = risk::days_left(deadline, now);
                (days_left <= UPCOMING_WINDOW_DAYS).then_some((task, days_left))
            })
            .take(UPCOMING_LIMIT);

        for (task, days_left) in upcoming {
            let _ = writeln!(context, "   - {} (due in {days_left} days)", task.title);
        }
    }

    context
}
