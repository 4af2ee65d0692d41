//! Tests for the planner module.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tempfile::TempDir;

use super::*;
use crate::{
    command::CommandOutcome,
    error::PlannerError,
    llm::mock::ScriptedGenerator,
    models::{Plan, TaskStatus},
    params::{
        AddSubtasks, AnalyzeRisks, ConfirmPlan, DraftPlan, GetProgress, Id, ListPlans, ProgressInput,
        RunTool, TaskInput, UpdateTaskStatus, UserMessage,
    },
    tools::ToolOutput,
};

/// Helper function to create a test planner with scripted generator answers
async fn create_test_planner(answers: Vec<&str>) -> (TempDir, Planner, Arc<ScriptedGenerator>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let generator = Arc::new(ScriptedGenerator::new(answers));
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_generator(generator.clone())
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner, generator)
}

fn task(title: &str) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        ..TaskInput::default()
    }
}

fn due_in(days: i64) -> String {
    Timestamp::now()
        .checked_add(SignedDuration::from_hours(days * 24 + 1))
        .unwrap()
        .to_string()
}

async fn confirm(planner: &Planner, user_id: &str, goal: &str, tasks: Vec<TaskInput>) -> Plan {
    planner
        .confirm_plan(&ConfirmPlan {
            user_id: user_id.to_string(),
            goal: goal.to_string(),
            tasks,
        })
        .await
        .expect("Failed to confirm plan")
}

#[tokio::test]
async fn test_confirm_plan_assigns_ids() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let mut parent = task("Write posts");
    parent.subtasks = vec![task("Draft"), task("Edit")];
    let plan = confirm(&planner, "alice", " Launch blog ", vec![parent, task("Publish")]).await;

    assert!(!plan.id.is_empty());
    assert_eq!(plan.goal, "Launch blog");
    assert_eq!(plan.tasks.len(), 2);
    assert!(plan.tasks[0].subtasks.iter().all(|t| !t.id.is_empty()));
    assert!(plan.tasks.iter().all(|t| t.status == TaskStatus::Pending));

    let fetched = planner.get_plan(&Id { id: plan.id.clone() }).await.unwrap();
    assert_eq!(fetched, plan);
}

#[tokio::test]
async fn test_confirm_plan_validation() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let result = planner
        .confirm_plan(&ConfirmPlan {
            user_id: "alice".to_string(),
            goal: "   ".to_string(),
            tasks: vec![],
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { field, .. }) if field == "goal"));

    let result = planner
        .confirm_plan(&ConfirmPlan {
            user_id: "alice".to_string(),
            goal: "Goal".to_string(),
            tasks: vec![task("")],
        })
        .await;
    assert!(matches!(result, Err(PlannerError::InvalidInput { field, .. }) if field == "title"));
}

#[tokio::test]
async fn test_list_plans_per_user() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    confirm(&planner, "alice", "First", vec![]).await;
    confirm(&planner, "bob", "Other", vec![]).await;
    confirm(&planner, "alice", "Second", vec![]).await;

    let plans = planner
        .list_plans(&ListPlans {
            user_id: "alice".to_string(),
        })
        .await
        .unwrap();
    let goals: Vec<_> = plans.iter().map(|p| p.goal.as_str()).collect();
    assert_eq!(goals, vec!["First", "Second"]);

    let none = planner
        .list_plans(&ListPlans {
            user_id: "carol".to_string(),
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_get_missing_plan_and_task() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let plan = planner.get_plan(&Id { id: "nope".to_string() }).await;
    assert!(matches!(plan, Err(PlannerError::PlanNotFound { .. })));

    let task = planner.get_task(&Id { id: "nope".to_string() }).await;
    assert!(matches!(task, Err(PlannerError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_update_nested_task_status() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let mut parent = task("Parent");
    parent.subtasks = vec![task("Child")];
    let plan = confirm(&planner, "alice", "Goal", vec![parent]).await;
    let child_id = plan.tasks[0].subtasks[0].id.clone();

    let updated = planner
        .update_task_status(&UpdateTaskStatus {
            task_id: child_id.clone(),
            status: "completed".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);

    let fetched = planner.get_task(&Id { id: child_id }).await.unwrap();
    assert_eq!(fetched.status, TaskStatus::Completed);

    let parent = planner
        .get_task(&Id {
            id: plan.tasks[0].id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(parent.status, TaskStatus::Pending);
    assert_eq!(parent.subtasks[0].status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_update_task_status_keeps_unknown_label() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;
    let plan = confirm(&planner, "alice", "Goal", vec![task("One")]).await;

    let updated = planner
        .update_task_status(&UpdateTaskStatus {
            task_id: plan.tasks[0].id.clone(),
            status: "Blocked".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(updated.status, TaskStatus::Other("Blocked".to_string()));
}

#[tokio::test]
async fn test_add_subtasks() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;
    let plan = confirm(&planner, "alice", "Goal", vec![task("Parent")]).await;

    let updated = planner
        .add_subtasks(&AddSubtasks {
            plan_id: plan.id.clone(),
            task_id: plan.tasks[0].id.clone(),
            subtasks: vec![task("First"), task("Second")],
        })
        .await
        .unwrap();

    let titles: Vec<_> = updated.tasks[0].subtasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert!(updated.tasks[0].subtasks.iter().all(|t| !t.id.is_empty()));

    let empty = planner
        .add_subtasks(&AddSubtasks {
            plan_id: plan.id.clone(),
            task_id: plan.tasks[0].id.clone(),
            subtasks: vec![],
        })
        .await;
    assert!(matches!(empty, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_draft_plan_does_not_persist() {
    let (_temp_dir, planner, generator) = create_test_planner(vec![
        r#"Here you go: [{"title": "Pick a host", "description": "Compare options", "deadline": "2099-01-10"}, {"title": "Write first post"}]"#,
    ])
    .await;

    let draft = planner
        .draft_plan(&DraftPlan {
            user_id: "alice".to_string(),
            goal: "Launch blog".to_string(),
            deadline: None,
        })
        .await
        .unwrap();

    assert_eq!(draft.goal, "Launch blog");
    assert_eq!(draft.tasks.len(), 2);
    assert_eq!(draft.tasks[0].deadline, Some("2099-01-10T00:00:00Z".parse().unwrap()));
    assert!(draft.tasks[1].deadline.is_some());
    assert_eq!(generator.call_count(), 1);
    assert!(generator.prompts()[0].contains("Launch blog"));

    let plans = planner
        .list_plans(&ListPlans {
            user_id: "alice".to_string(),
        })
        .await
        .unwrap();
    assert!(plans.is_empty());
}

#[tokio::test]
async fn test_draft_plan_rejects_bad_deadline() {
    let (_temp_dir, planner, generator) = create_test_planner(vec![]).await;

    let result = planner
        .draft_plan(&DraftPlan {
            user_id: "alice".to_string(),
            goal: "Launch blog".to_string(),
            deadline: Some("2001-01-01".to_string()),
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { field, .. }) if field == "deadline"));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_refine_task() {
    let (_temp_dir, planner, generator) =
        create_test_planner(vec![r#"[{"title": "Sketch layout"}, {"title": "  "}, {"title": "Pick fonts"}]"#]).await;
    let plan = confirm(&planner, "alice", "Goal", vec![task("Design site")]).await;

    let subtasks = planner
        .refine_task(&Id {
            id: plan.tasks[0].id.clone(),
        })
        .await
        .unwrap();

    let titles: Vec<_> = subtasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Sketch layout", "Pick fonts"]);
    assert!(generator.prompts()[0].contains("Design site"));

    // Suggestions are not saved
    let stored = planner.get_plan(&Id { id: plan.id }).await.unwrap();
    assert!(stored.tasks[0].subtasks.is_empty());
}

#[tokio::test]
async fn test_analyze_risks() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let mut soon = task("Soon");
    soon.deadline = Some(due_in(1));
    let mut later = task("Later");
    later.deadline = Some(due_in(10));
    confirm(&planner, "alice", "Goal", vec![soon, later]).await;

    let report = planner
        .analyze_risks(&AnalyzeRisks {
            user_id: "alice".to_string(),
            threshold_days: None,
        })
        .await
        .unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(report.risks[0].task_name, "Soon");
    assert_eq!(report.threshold_days, 3);

    let wide = planner
        .analyze_risks(&AnalyzeRisks {
            user_id: "alice".to_string(),
            threshold_days: Some(30),
        })
        .await
        .unwrap();
    assert_eq!(wide.count, 2);
}

#[tokio::test]
async fn test_get_user_progress_by_plan_id() {
    let (_temp_dir, planner, generator) = create_test_planner(vec![]).await;

    let mut done = task("Done");
    done.status = Some("Completed".to_string());
    let plan = confirm(&planner, "alice", "Goal", vec![done, task("Open")]).await;

    let progress = planner
        .get_user_progress(&GetProgress {
            user_id: "alice".to_string(),
            plan_id: Some(plan.id.clone()),
            message: None,
        })
        .await
        .unwrap();

    assert_eq!(progress.completion_percentage, 50);
    assert_eq!(progress.total_tasks, 2);
    assert_eq!(progress.completed_tasks, 1);
    assert_eq!(generator.call_count(), 0);

    let other_user = planner
        .get_user_progress(&GetProgress {
            user_id: "bob".to_string(),
            plan_id: Some(plan.id),
            message: None,
        })
        .await;
    assert!(matches!(other_user, Err(PlannerError::PlanNotFound { .. })));
}

#[tokio::test]
async fn test_provide_feedback() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let feedback = planner.provide_feedback(&ProgressInput {
        goal: "Launch blog".to_string(),
        completion_percentage: 80,
        total_tasks: 10,
        completed_tasks: 8,
    });

    assert_eq!(feedback.tone, "Almost there! 🔥");
    assert_eq!(feedback.progress_summary.remaining_tasks, 2);
}

#[tokio::test]
async fn test_reschedule_plan() {
    let (_temp_dir, planner, _) = create_test_planner(vec!["Launch blog"]).await;

    let mut first = task("Write");
    first.deadline = Some("2026-11-01".to_string());
    let plan = confirm(&planner, "alice", "Launch blog", vec![first]).await;

    let result = planner
        .reschedule_plan(&UserMessage {
            user_id: "alice".to_string(),
            message: "I'm 2 days behind on my blog".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.goal_id, plan.id);
    assert_eq!(result.tasks[0].deadline, Some("2026-11-03T00:00:00Z".parse().unwrap()));

    let stored = planner.get_plan(&Id { id: plan.id }).await.unwrap();
    assert_eq!(stored.tasks[0].deadline, Some("2026-11-03T00:00:00Z".parse().unwrap()));
}

#[tokio::test]
async fn test_handle_command_progress_chains_feedback() {
    let (_temp_dir, planner, _) = create_test_planner(vec!["Launch blog"]).await;

    let mut done = task("Write");
    done.status = Some("Completed".to_string());
    confirm(&planner, "alice", "Launch blog", vec![done]).await;

    let outcome = planner
        .handle_command(&UserMessage {
            user_id: "alice".to_string(),
            message: "How is my progress on the blog?".to_string(),
        })
        .await
        .unwrap();

    match outcome {
        CommandOutcome::Feedback { feedback } => {
            assert_eq!(feedback.tone, "Goal achieved! 🎉");
            assert_eq!(feedback.progress_summary.goal, "Launch blog");
        }
        other => panic!("expected feedback, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handle_command_rejects_empty_message() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let result = planner
        .handle_command(&UserMessage {
            user_id: "alice".to_string(),
            message: "  ".to_string(),
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_run_tool_from_wire() {
    let (_temp_dir, planner, _) = create_test_planner(vec![]).await;

    let output = planner
        .run_tool(&RunTool {
            tool: "provide_feedback".to_string(),
            params: serde_json::json!({
                "progress_data": {
                    "goal": "Launch blog",
                    "completion_percentage": 0,
                    "total_tasks": 4,
                    "completed_tasks": 0
                }
            }),
        })
        .await
        .unwrap();
    assert!(matches!(output, ToolOutput::Feedback { feedback } if feedback.tone == "Let's get started! 🚀"));

    let unknown = planner
        .run_tool(&RunTool {
            tool: "launch_rockets".to_string(),
            params: serde_json::json!({}),
        })
        .await;
    assert!(matches!(unknown, Err(PlannerError::Dispatch { .. })));
}
