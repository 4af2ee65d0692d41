//! Deadline risk scanning.

use jiff::Timestamp;
use log::debug;

use crate::{
    error::Result,
    models::{Plan, RiskItem, RiskReport},
    store::PlanStore,
    tree,
};

/// Threshold used when the caller does not give one.
pub const DEFAULT_THRESHOLD_DAYS: i64 = 3;

/// Whole days from `now` until `deadline`: elapsed whole hours divided by
/// 24, truncated toward zero. Negative once the deadline has passed.
pub fn days_left(deadline: Timestamp, now: Timestamp) -> i64 {
    deadline.duration_since(now).as_hours() / 24
}

/// Tasks of `plan`, at any depth, whose deadline is at most
/// `threshold_days` away. Overdue tasks are included; tasks without a
/// deadline are skipped but their subtasks are still scanned. Results are
/// in tree order.
pub fn scan(plan: &Plan, now: Timestamp, threshold_days: i64) -> Vec<RiskItem> {
    let mut risks = Vec::new();

    tree::visit(&plan.tasks, &mut |task, _| {
        let Some(deadline) = task.deadline else {
            return;
        };
        let days_left = days_left(deadline, now);
        if days_left <= threshold_days {
            risks.push(RiskItem {
                goal: plan.goal.clone(),
                task_name: task.title.clone(),
                deadline: deadline.strftime("%Y-%m-%d").to_string(),
                days_left,
            });
        }
    });

    risks
}

/// Scans every plan of the user and orders the union by urgency. The sort
/// is stable, so equally urgent tasks keep plan and tree order.
pub fn report(user_id: &str, plans: &[Plan], now: Timestamp, threshold_days: i64) -> RiskReport {
    let mut risks: Vec<RiskItem> = plans
        .iter()
        .flat_map(|plan| scan(plan, now, threshold_days))
        .collect();
    risks.sort_by_key(|risk| risk.days_left);

    RiskReport {
        user_id: user_id.to_string(),
        count: risks.len(),
        risks,
        threshold_days,
    }
}

/// `analyze_risks`: loads the user's plans and builds the risk report.
pub async fn analyze_risks(
    store: &dyn PlanStore,
    user_id: &str,
    threshold_days: Option<i64>,
    now: Timestamp,
) -> Result<RiskReport> {
    super::require("user_id", user_id)?;
    let threshold_days = threshold_days.unwrap_or(DEFAULT_THRESHOLD_DAYS);

    let plans = store.get_all_by_user(user_id).await?;
    let report = report(user_id, &plans, now, threshold_days);
    debug!(
        "analyze_risks: {} at-risk tasks across {} plans (threshold {threshold_days})",
        report.count,
        plans.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;
    use crate::models::Task;

    fn now() -> Timestamp {
        "2026-10-19T12:00:00Z".parse().unwrap()
    }

    fn in_hours(hours: i64) -> Timestamp {
        now().checked_add(SignedDuration::from_hours(hours)).unwrap()
    }

    fn plan(goal: &str, tasks: Vec<Task>) -> Plan {
        Plan {
            id: goal.to_lowercase(),
            user_id: "u1".to_string(),
            goal: goal.to_string(),
            tasks,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_days_left_truncates_toward_zero() {
        assert_eq!(days_left(in_hours(47), now()), 1);
        assert_eq!(days_left(in_hours(48), now()), 2);
        assert_eq!(days_left(in_hours(-12), now()), 0);
        assert_eq!(days_left(in_hours(-30), now()), -1);
    }

    #[test]
    fn test_nested_subtask_sorts_before_parent() {
        let plans = vec![plan(
            "Ship app",
            vec![Task::new("Parent")
                .with_deadline(in_hours(48))
                .with_subtask(Task::new("Child").with_deadline(in_hours(24)))],
        )];

        let report = report("u1", &plans, now(), DEFAULT_THRESHOLD_DAYS);

        let names: Vec<_> = report.risks.iter().map(|r| (r.task_name.as_str(), r.days_left)).collect();
        assert_eq!(names, vec![("Child", 1), ("Parent", 2)]);
        assert_eq!(report.count, 2);
        assert_eq!(report.threshold_days, 3);
    }

    #[test]
    fn test_overdue_included_and_far_tasks_excluded() {
        let plans = vec![plan(
            "Goal",
            vec![
                Task::new("Overdue").with_deadline(in_hours(-72)),
                Task::new("Far").with_deadline(in_hours(24 * 10)),
                Task::new("Undated").with_subtask(Task::new("Dated child").with_deadline(in_hours(5))),
            ],
        )];

        let risks = scan(&plans[0], now(), 3);

        let names: Vec<_> = risks.iter().map(|r| r.task_name.as_str()).collect();
        assert_eq!(names, vec!["Overdue", "Dated child"]);
        assert_eq!(risks[0].days_left, -3);
        assert_eq!(risks[0].goal, "Goal");
    }

    #[test]
    fn test_scan_is_idempotent() {
        let p = plan(
            "Goal",
            vec![Task::new("a").with_deadline(in_hours(30)), Task::new("b").with_deadline(in_hours(-1))],
        );

        assert_eq!(scan(&p, now(), 3), scan(&p, now(), 3));
    }

    #[test]
    fn test_deadline_formatted_as_utc_date() {
        let p = plan(
            "Goal",
            vec![Task::new("late evening").with_deadline("2026-10-20T23:30:00Z".parse().unwrap())],
        );

        let risks = scan(&p, now(), 3);
        assert_eq!(risks[0].deadline, "2026-10-20");
    }

    #[test]
    fn test_sort_is_stable_across_plans() {
        let plans = vec![
            plan("First", vec![Task::new("f").with_deadline(in_hours(25))]),
            plan("Second", vec![Task::new("s").with_deadline(in_hours(26))]),
        ];

        let report = report("u1", &plans, now(), 3);
        let goals: Vec<_> = report.risks.iter().map(|r| r.goal.as_str()).collect();
        assert_eq!(goals, vec!["First", "Second"]);
    }
}
