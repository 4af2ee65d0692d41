//! Resolving free text to one of the user's plans.

use log::debug;

use crate::{
    error::{PlannerError, Result},
    llm::TextGenerator,
    models::Plan,
    store::PlanStore,
};

/// Answer the generator gives when no goal fits.
const NO_MATCH: &str = "NONE";

/// Finds the plan of `user_id` whose goal `text` refers to.
pub async fn match_goal(
    store: &dyn PlanStore,
    generator: &dyn TextGenerator,
    user_id: &str,
    text: &str,
) -> Result<Plan> {
    let plans = store.get_all_by_user(user_id).await?;
    choose_plan(generator, user_id, text, plans).await
}

/// Asks the generator which of `plans` the text refers to. The answer must
/// name one of the goals (case-insensitively, ignoring surrounding
/// whitespace and quotes).
pub async fn choose_plan(
    generator: &dyn TextGenerator,
    user_id: &str,
    text: &str,
    plans: Vec<Plan>,
) -> Result<Plan> {
    if plans.is_empty() {
        return Err(PlannerError::NoPlans {
            user_id: user_id.to_string(),
        });
    }

    let goals: Vec<&str> = plans.iter().map(|plan| plan.goal.as_str()).collect();
    let answer = generator.generate(&goal_prompt(text, &goals)).await?;
    let answer = normalize_answer(&answer);
    debug!("choose_plan: generator picked '{answer}' among {} goals", goals.len());

    if answer.eq_ignore_ascii_case(NO_MATCH) {
        return Err(PlannerError::NoMatch { answer });
    }

    let lowered = answer.to_lowercase();
    plans
        .into_iter()
        .find(|plan| plan.goal.trim().to_lowercase() == lowered)
        .ok_or(PlannerError::NoMatch { answer })
}

fn normalize_answer(answer: &str) -> String {
    answer
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
        .to_string()
}

fn goal_prompt(text: &str, goals: &[&str]) -> String {
    format!(
        r#"You are a goal-matching assistant for a task planning app.

User message: "{text}"

Here are the available goals:
{goals}

Rules:
- Choose exactly ONE goal from the list that best matches the user's message.
- Respond with the goal exactly as written above, no extra text.
- If none of the goals are relevant, reply with "{NO_MATCH}" (in uppercase, by itself)."#,
        goals = goals.join("\n"),
    )
}
