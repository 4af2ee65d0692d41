//! Command execution for the CLI.
//!
//! [`Cli`] runs one parsed command against the [`Planner`] and prints the
//! result, as markdown through the [`TerminalRenderer`] or as pretty JSON
//! with `--json`.

use std::fmt::Display;

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use waypoint_core::{
    display::{CreateResult, Plans, Tasks, UpdateResult},
    params::{
        AddSubtasks, AnalyzeRisks, ConfirmPlan, Id, ListPlans, RunTool, TaskInput, UpdateTaskStatus,
        UserMessage,
    },
    Planner,
};

use crate::{
    args::{
        CreatePlanArgs, DraftArgs, FeedbackArgs, PlanCommands, ProgressArgs, RefineArgs, TaskCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    user_id: String,
    json: bool,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, user_id: String, json: bool) -> Self {
        Self {
            planner,
            renderer,
            user_id,
            json,
        }
    }

    fn emit<T: Serialize>(&self, value: &T, markdown: impl Display) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value).context("Failed to encode JSON")?);
            Ok(())
        } else {
            self.renderer.render(&markdown.to_string())
        }
    }

    fn message(&self, words: Vec<String>) -> UserMessage {
        UserMessage {
            user_id: self.user_id.clone(),
            message: words.join(" "),
        }
    }

    pub async fn ask(&self, words: Vec<String>) -> Result<()> {
        let params = self.message(words);
        debug!("ask: {:?}", params.message);
        let outcome = self.planner.handle_command(&params).await.context("Failed to run command")?;
        self.emit(&outcome, &outcome)
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Draft(args) => self.draft_plan(args).await,
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let plan = self.planner.get_plan(&args.into()).await.context("Failed to show plan")?;
                self.emit(&plan, &plan)
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Show(args) => {
                let task = self.planner.get_task(&args.into()).await.context("Failed to show task")?;
                self.emit(&task, &task)
            }
            TaskCommands::Status(args) => {
                let params: UpdateTaskStatus = args.into();
                let task = self
                    .planner
                    .update_task_status(&params)
                    .await
                    .context("Failed to update task")?;
                let change = format!("Status set to {}", task.status);
                self.emit(&task, UpdateResult::with_changes(task.clone(), vec![change]))
            }
            TaskCommands::Add(args) => {
                let params: AddSubtasks = args.into();
                let plan = self.planner.add_subtasks(&params).await.context("Failed to add subtasks")?;
                let change = format!("Added {} subtask(s) to {}", params.subtasks.len(), params.task_id);
                self.emit(&plan, UpdateResult::with_changes(plan.clone(), vec![change]))
            }
            TaskCommands::Refine(args) => self.refine_task(args).await,
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = self
            .planner
            .list_plans(&ListPlans {
                user_id: self.user_id.clone(),
            })
            .await
            .context("Failed to list plans")?;

        let title = if plans.is_empty() { "No plans" } else { "Plans" };
        let markdown = format!("# {title} for {}\n\n{}", self.user_id, Plans(plans.clone()));
        self.emit(&plans, markdown)
    }

    async fn draft_plan(&self, args: DraftArgs) -> Result<()> {
        let save = args.save;
        let draft = self
            .planner
            .draft_plan(&args.into_params(self.user_id.clone()))
            .await
            .context("Failed to draft plan")?;

        if !save {
            return self.emit(&draft, &draft);
        }

        let plan = self
            .planner
            .confirm_plan(&ConfirmPlan {
                user_id: self.user_id.clone(),
                goal: draft.goal,
                tasks: draft.tasks.into_iter().map(TaskInput::from).collect(),
            })
            .await
            .context("Failed to save plan")?;
        self.emit(&plan, CreateResult::new(plan.clone()))
    }

    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let mut tasks: Vec<TaskInput> = match &args.file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("Invalid task list in {}", path.display()))?
            }
            None => Vec::new(),
        };
        tasks.extend(args.tasks.into_iter().map(|title| TaskInput {
            title,
            ..TaskInput::default()
        }));

        let plan = self
            .planner
            .confirm_plan(&ConfirmPlan {
                user_id: self.user_id.clone(),
                goal: args.goal,
                tasks,
            })
            .await
            .context("Failed to create plan")?;
        self.emit(&plan, CreateResult::new(plan.clone()))
    }

    async fn refine_task(&self, args: RefineArgs) -> Result<()> {
        let suggestions = self
            .planner
            .refine_task(&Id { id: args.id.clone() })
            .await
            .context("Failed to refine task")?;

        match args.save_to {
            Some(plan_id) if !suggestions.is_empty() => {
                let plan = self
                    .planner
                    .add_subtasks(&AddSubtasks {
                        plan_id,
                        task_id: args.id,
                        subtasks: suggestions.into_iter().map(TaskInput::from).collect(),
                    })
                    .await
                    .context("Failed to save subtasks")?;
                self.emit(&plan, &plan)
            }
            _ => self.emit(&suggestions, Tasks(suggestions.clone())),
        }
    }

    pub async fn risks(&self, days: Option<i64>) -> Result<()> {
        let report = self
            .planner
            .analyze_risks(&AnalyzeRisks {
                user_id: self.user_id.clone(),
                threshold_days: days,
            })
            .await
            .context("Failed to analyze risks")?;
        self.emit(&report, &report)
    }

    pub async fn progress(&self, args: ProgressArgs) -> Result<()> {
        let summary = self
            .planner
            .get_user_progress(&args.into_params(self.user_id.clone()))
            .await
            .context("Failed to get progress")?;
        self.emit(&summary, &summary)
    }

    pub fn feedback(&self, args: FeedbackArgs) -> Result<()> {
        let feedback = self.planner.provide_feedback(&args.into());
        self.emit(&feedback, &feedback)
    }

    pub async fn reschedule(&self, words: Vec<String>) -> Result<()> {
        let result = self
            .planner
            .reschedule_plan(&self.message(words))
            .await
            .context("Failed to reschedule plan")?;
        self.emit(&result, &result)
    }

    pub async fn alternatives(&self) -> Result<()> {
        let params = serde_json::json!({ "user_id": self.user_id });
        self.run_tool("generate_alternative_plans".to_string(), params).await
    }

    pub async fn tool(&self, name: String, params: &str) -> Result<()> {
        let params = serde_json::from_str(params).context("Tool parameters must be JSON")?;
        self.run_tool(name, params).await
    }

    async fn run_tool(&self, name: String, params: serde_json::Value) -> Result<()> {
        let output = self
            .planner
            .run_tool(&RunTool { tool: name, params })
            .await
            .context("Failed to run tool")?;
        self.emit(&output, &output)
    }
}
