//! Completion statistics.

use log::debug;

use crate::{
    error::{PlannerError, Result},
    llm::TextGenerator,
    models::{Plan, ProgressSummary},
    store::PlanStore,
    tree,
};

/// Counts every task of the plan at every depth. Only the `Completed`
/// status (matched case-insensitively) counts as done.
pub fn aggregate(user_id: &str, plan: &Plan) -> ProgressSummary {
    let mut total: u32 = 0;
    let mut completed: u32 = 0;

    tree::visit(&plan.tasks, &mut |task, _| {
        total += 1;
        if task.status.is_completed() {
            completed += 1;
        }
    });

    ProgressSummary {
        user_id: user_id.to_string(),
        goal: plan.goal.clone(),
        completion_percentage: percentage(completed, total),
        total_tasks: total,
        completed_tasks: completed,
    }
}

/// `floor(100 * completed / total)`, 0 for an empty plan.
pub fn percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (u64::from(completed) * 100 / u64::from(total)) as u32
}

/// `get_user_progress`. The plan is the one named by `plan_id` when given,
/// otherwise the one `message` refers to, otherwise the user's first plan.
pub async fn get_user_progress(
    store: &dyn PlanStore,
    generator: &dyn TextGenerator,
    user_id: &str,
    plan_id: Option<&str>,
    message: Option<&str>,
) -> Result<ProgressSummary> {
    super::require("user_id", user_id)?;

    let plan = match plan_id.filter(|id| !id.trim().is_empty()) {
        Some(plan_id) => {
            let plan = store.get_by_id(plan_id).await?;
            if plan.user_id != user_id {
                return Err(PlannerError::PlanNotFound {
                    id: plan_id.to_string(),
                });
            }
            plan
        }
        None => {
            let mut plans = store.get_all_by_user(user_id).await?;
            if plans.is_empty() {
                return Err(PlannerError::NoPlans {
                    user_id: user_id.to_string(),
                });
            }
            match message.filter(|m| !m.trim().is_empty()) {
                Some(message) => super::matching::choose_plan(generator, user_id, message, plans).await?,
                None => plans.remove(0),
            }
        }
    };

    let summary = aggregate(user_id, &plan);
    debug!(
        "get_user_progress: '{}' at {}% ({}/{})",
        summary.goal, summary.completion_percentage, summary.completed_tasks, summary.total_tasks
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Task, TaskStatus};

    fn plan(tasks: Vec<Task>) -> Plan {
        Plan {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            goal: "Learn Rust".to_string(),
            tasks,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn done(title: &str) -> Task {
        Task::new(title).with_status(TaskStatus::Completed)
    }

    #[test]
    fn test_counts_whole_tree() {
        // 2 top-level tasks, 5 nested, 3 completed at mixed depths
        let p = plan(vec![
            done("a").with_subtask(Task::new("a1")).with_subtask(done("a2")),
            Task::new("b")
                .with_subtask(Task::new("b1").with_subtask(done("b1x")))
                .with_subtask(Task::new("b2")),
        ]);

        let summary = aggregate("u1", &p);

        assert_eq!(summary.total_tasks, 7);
        assert_eq!(summary.completed_tasks, 3);
        assert_eq!(summary.completion_percentage, 42);
    }

    #[test]
    fn test_six_tasks_three_done_is_fifty_percent() {
        let p = plan(vec![
            done("a").with_subtask(done("a1")).with_subtask(Task::new("a2")),
            done("b"),
            Task::new("c"),
            Task::new("d"),
        ]);

        let summary = aggregate("u1", &p);

        assert_eq!((summary.total_tasks, summary.completed_tasks), (6, 3));
        assert_eq!(summary.completion_percentage, 50);
        assert_eq!(summary.goal, "Learn Rust");
    }

    #[test]
    fn test_empty_plan_is_zero_percent() {
        let summary = aggregate("u1", &plan(Vec::new()));
        assert_eq!(summary.completion_percentage, 0);
        assert_eq!(summary.total_tasks, 0);
    }

    #[test]
    fn test_status_label_case_insensitive() {
        let p = plan(vec![
            Task::new("a").with_status(TaskStatus::from("COMPLETED")),
            Task::new("b").with_status(TaskStatus::from("Done")),
            Task::new("c").with_status(TaskStatus::InProgress),
        ]);

        assert_eq!(aggregate("u1", &p).completed_tasks, 1);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(percentage(0, 3), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(u32::MAX, u32::MAX), 100);
    }
}
