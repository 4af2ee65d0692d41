use jiff::Timestamp;
use tempfile::NamedTempFile;
use waypoint_core::{Database, Plan, PlannerError, Task, TaskStatus};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn new_plan(user_id: &str, goal: &str, tasks: Vec<Task>) -> Plan {
    Plan {
        id: String::new(),
        user_id: user_id.to_string(),
        goal: goal.to_string(),
        tasks,
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}

#[test]
fn test_create_and_get_plan_tree() {
    let (_temp_file, mut db) = create_test_db();

    let deadline: Timestamp = "2026-11-01T00:00:00Z".parse().unwrap();
    let tasks = vec![
        Task::new("Write posts")
            .with_description("Three to start")
            .with_deadline(deadline)
            .with_subtask(Task::new("Draft").with_subtask(Task::new("Outline")))
            .with_subtask(Task::new("Edit").with_status(TaskStatus::InProgress)),
        Task::new("Publish"),
    ];
    let created = db
        .create_plan(new_plan("alice", "Launch blog", tasks))
        .expect("Failed to create plan");

    assert!(!created.id.is_empty());

    let loaded = db
        .get_plan(&created.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");

    assert_eq!(loaded, created);
    assert_eq!(loaded.tasks[0].deadline, Some(deadline));
    assert_eq!(loaded.tasks[0].subtasks[0].subtasks[0].title, "Outline");
    assert_eq!(loaded.tasks[0].subtasks[1].status, TaskStatus::InProgress);
    assert_eq!(loaded.tasks[1].title, "Publish");
}

#[test]
fn test_get_missing_plan() {
    let (_temp_file, db) = create_test_db();

    assert!(db.get_plan("missing").expect("query should succeed").is_none());
}

#[test]
fn test_find_plan_by_nested_task() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(new_plan("alice", "Goal", vec![Task::new("a").with_subtask(Task::new("b"))]))
        .unwrap();
    let nested_id = &plan.tasks[0].subtasks[0].id;

    assert_eq!(db.find_plan_id_by_task(nested_id).unwrap(), Some(plan.id.clone()));
    assert_eq!(db.find_plan_id_by_task("nope").unwrap(), None);
}

#[test]
fn test_update_plan_replaces_tasks() {
    let (_temp_file, mut db) = create_test_db();

    let mut plan = db
        .create_plan(new_plan("alice", "Goal", vec![Task::new("Old")]))
        .unwrap();
    plan.goal = "Renamed".to_string();
    plan.tasks = vec![Task::new("New one"), Task::new("New two")];

    db.update_plan(plan.clone()).unwrap();
    let loaded = db.get_plan(&plan.id).unwrap().unwrap();

    assert_eq!(loaded.goal, "Renamed");
    let titles: Vec<_> = loaded.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["New one", "New two"]);
}

#[test]
fn test_update_unknown_plan() {
    let (_temp_file, mut db) = create_test_db();

    let mut plan = new_plan("alice", "Goal", vec![]);
    plan.id = "missing".to_string();

    assert!(matches!(db.update_plan(plan), Err(PlannerError::PlanNotFound { .. })));
}

#[test]
fn test_append_subtasks_after_existing() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(new_plan("alice", "Goal", vec![Task::new("Parent").with_subtask(Task::new("First"))]))
        .unwrap();
    let parent_id = plan.tasks[0].id.clone();

    let updated = db
        .append_subtasks(&plan.id, &parent_id, vec![Task::new("Second"), Task::new("Third")])
        .unwrap();

    let titles: Vec<_> = updated.tasks[0].subtasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn test_unknown_status_label_survives() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan(new_plan(
            "alice",
            "Goal",
            vec![Task::new("Waiting").with_status(TaskStatus::Other("Blocked".to_string()))],
        ))
        .unwrap();

    let loaded = db.get_plan(&plan.id).unwrap().unwrap();
    assert_eq!(loaded.tasks[0].status, TaskStatus::Other("Blocked".to_string()));
}

#[test]
fn test_list_plans_by_user() {
    let (_temp_file, mut db) = create_test_db();

    db.create_plan(new_plan("alice", "One", vec![])).unwrap();
    db.create_plan(new_plan("bob", "Two", vec![])).unwrap();
    db.create_plan(new_plan("alice", "Three", vec![])).unwrap();

    let goals: Vec<_> = db
        .list_plans_by_user("alice")
        .unwrap()
        .into_iter()
        .map(|p| p.goal)
        .collect();
    assert_eq!(goals, vec!["One", "Three"]);
}
