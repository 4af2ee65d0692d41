//! Strategy options for users who want to go faster.

use crate::{
    error::{PlannerError, Result},
    models::{AlternativePlans, GoalAlternatives, StrategyOption},
    store::PlanStore,
};

const STRATEGIES: [(&str, &str); 3] = [
    ("speed", "Focus on completing tasks faster, may reduce quality."),
    ("balance", "Balanced approach between speed and quality."),
    ("quality", "Focus on doing tasks with highest quality, may take longer."),
];

/// The speed / balance / quality options, in that order.
pub fn strategy_options() -> Vec<StrategyOption> {
    STRATEGIES
        .iter()
        .map(|(kind, description)| StrategyOption {
            kind: kind.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// `generate_alternative_plans`: the strategy options for every plan of
/// the user.
pub async fn generate_alternative_plans(store: &dyn PlanStore, user_id: &str) -> Result<AlternativePlans> {
    super::require("user_id", user_id)?;

    let plans = store.get_all_by_user(user_id).await?;
    if plans.is_empty() {
        return Err(PlannerError::NoPlans {
            user_id: user_id.to_string(),
        });
    }

    Ok(AlternativePlans {
        user_id: user_id.to_string(),
        goals: plans
            .into_iter()
            .map(|plan| GoalAlternatives {
                goal_id: plan.id,
                goal: plan.goal,
                options: strategy_options(),
            })
            .collect(),
    })
}
