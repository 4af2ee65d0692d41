//! Integration tests comparing CLI output with the core Display
//! implementations the MCP server returns.

use std::process::Command;

use tempfile::TempDir;
use waypoint_core::{
    display::{CreateResult, Plans},
    params::{ConfirmPlan, ListPlans, TaskInput},
    GeneratorConfig, Planner, PlannerBuilder,
};

/// Helper function to create a test planner with temporary database
async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .with_generator_config(GeneratorConfig::default())
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wp"));
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(["--user", "alice"]);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_created_plan_matches_display() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");

    let cli_output = run_cli_command(db_path.to_str().unwrap(), &["plan", "create", "Via CLI", "--task", "First"]);

    let plan = planner
        .confirm_plan(&ConfirmPlan {
            user_id: "alice".to_string(),
            goal: "Direct".to_string(),
            tasks: vec![TaskInput {
                title: "First".to_string(),
                ..TaskInput::default()
            }],
        })
        .await
        .expect("Failed to create plan");
    let direct_output = CreateResult::new(plan).to_string();

    for output in [&cli_output, &direct_output] {
        assert!(output.contains("Created plan with ID:"));
        assert!(output.contains("## Tasks"));
        assert!(output.contains("### First (○ Pending)"));
    }
}

#[tokio::test]
async fn test_cli_sees_plans_created_directly() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");

    planner
        .confirm_plan(&ConfirmPlan {
            user_id: "alice".to_string(),
            goal: "Shared".to_string(),
            tasks: vec![],
        })
        .await
        .expect("Failed to create plan");

    let plans = planner
        .list_plans(&ListPlans {
            user_id: "alice".to_string(),
        })
        .await
        .unwrap();
    let direct_output = Plans(plans).to_string();
    let cli_output = run_cli_command(db_path.to_str().unwrap(), &["plan", "list"]);

    assert!(cli_output.contains("## Shared (0/0)"));
    assert!(direct_output.contains("## Shared (0/0)"));
}
