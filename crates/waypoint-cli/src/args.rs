//! Command-line arguments using clap's derive API.
//!
//! Argument structs are thin wrappers over the core parameter types and
//! convert into them with `From`/`into_params`, so clap attributes never
//! leak into `waypoint_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use waypoint_core::params::{
    AddSubtasks, DraftPlan, GetProgress, Id, ProgressInput, TaskInput, UpdateTaskStatus,
};

/// Smart task planner: goals, task trees and natural-language commands
///
/// Plans are stored in SQLite. Commands that need a language model (drafting,
/// refining, goal matching, general questions) call an OpenAI-compatible
/// chat-completions API configured through OPENAI_API_KEY and the
/// WAYPOINT_LLM_* variables.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// User whose plans to work with
    #[arg(long, short, global = true, env = "WAYPOINT_USER", default_value = "default")]
    pub user: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command, the user's plans are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Send a free-text command, e.g. "I'm 2 days behind on my blog"
    Ask {
        /// The message; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage tasks within plans
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// List tasks that are due soon or overdue
    Risks {
        /// Flag tasks due within this many days
        #[arg(long, short)]
        days: Option<i64>,
    },
    /// Show completion statistics for a plan
    Progress(ProgressArgs),
    /// Show feedback for given progress figures
    Feedback(FeedbackArgs),
    /// Shift a plan's deadlines, e.g. "3 days behind on the blog"
    Reschedule {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Suggest alternative strategies for every plan
    Alternatives,
    /// Run a tool by name with JSON parameters
    Tool {
        /// Tool name, e.g. analyze_risks
        name: String,
        /// Parameters as a JSON object
        #[arg(default_value = "{}")]
        params: String,
    },
    /// Start the MCP server on stdio
    Serve,
}

/// Plan subcommands.
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Draft tasks for a goal with the language model
    Draft(DraftArgs),
    /// Create a plan from a JSON file of tasks
    Create(CreatePlanArgs),
    /// List plans
    #[command(alias = "ls")]
    List,
    /// Show a plan with its task tree
    Show(IdArgs),
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show a task with its subtasks
    Show(IdArgs),
    /// Set the status of a task
    Status(StatusArgs),
    /// Append subtasks to a task
    Add(AddSubtasksArgs),
    /// Suggest subtasks for a task with the language model
    Refine(RefineArgs),
}

/// A plan or task ID.
#[derive(ClapArgs)]
pub struct IdArgs {
    /// Unique identifier of the plan or task
    pub id: String,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Draft a plan.
#[derive(ClapArgs)]
pub struct DraftArgs {
    /// Goal to plan for
    pub goal: String,
    /// Date the goal should be reached by (YYYY-MM-DD, default: in 14 days)
    #[arg(long, short)]
    pub deadline: Option<String>,
    /// Save the draft as a plan right away
    #[arg(long)]
    pub save: bool,
}

impl DraftArgs {
    pub fn into_params(self, user_id: String) -> DraftPlan {
        DraftPlan {
            user_id,
            goal: self.goal,
            deadline: self.deadline,
        }
    }
}

/// Create a plan.
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Goal of the plan
    pub goal: String,
    /// JSON file holding an array of tasks
    /// ({"title", "description", "deadline", "status", "subtasks"})
    #[arg(long, short)]
    pub file: Option<PathBuf>,
    /// Title of a top-level task; may be repeated
    #[arg(long = "task", short = 't')]
    pub tasks: Vec<String>,
}

/// Change a task's status.
#[derive(ClapArgs)]
pub struct StatusArgs {
    /// ID of the task
    pub id: String,
    /// New status: pending, inprogress, completed or any other label
    pub status: String,
}

impl From<StatusArgs> for UpdateTaskStatus {
    fn from(val: StatusArgs) -> Self {
        UpdateTaskStatus {
            task_id: val.id,
            status: val.status,
        }
    }
}

/// Append subtasks.
#[derive(ClapArgs)]
pub struct AddSubtasksArgs {
    /// ID of the plan that owns the task
    pub plan_id: String,
    /// ID of the parent task
    pub task_id: String,
    /// Titles of the subtasks to append, in order
    #[arg(required = true, num_args = 1..)]
    pub titles: Vec<String>,
}

impl From<AddSubtasksArgs> for AddSubtasks {
    fn from(val: AddSubtasksArgs) -> Self {
        AddSubtasks {
            plan_id: val.plan_id,
            task_id: val.task_id,
            subtasks: val
                .titles
                .into_iter()
                .map(|title| TaskInput {
                    title,
                    ..TaskInput::default()
                })
                .collect(),
        }
    }
}

/// Refine a task.
#[derive(ClapArgs)]
pub struct RefineArgs {
    /// ID of the task
    pub id: String,
    /// ID of the plan; when given, the suggestions are appended to the task
    #[arg(long)]
    pub save_to: Option<String>,
}

/// Progress report.
#[derive(ClapArgs)]
pub struct ProgressArgs {
    /// Report on this plan
    #[arg(long, short)]
    pub plan: Option<String>,
    /// Otherwise report on the plan this text refers to
    pub message: Vec<String>,
}

impl ProgressArgs {
    pub fn into_params(self, user_id: String) -> GetProgress {
        let message = self.message.join(" ");
        GetProgress {
            user_id,
            plan_id: self.plan,
            message: Some(message).filter(|m| !m.trim().is_empty()),
        }
    }
}

/// Progress figures for feedback.
#[derive(ClapArgs)]
pub struct FeedbackArgs {
    /// Completion percentage, 0-100
    pub percentage: u32,
    /// Goal of the plan
    #[arg(long, short, default_value = "")]
    pub goal: String,
    /// Number of tasks in the plan
    #[arg(long, default_value_t = 0)]
    pub total: u32,
    /// Number of completed tasks
    #[arg(long, default_value_t = 0)]
    pub completed: u32,
}

impl From<FeedbackArgs> for ProgressInput {
    fn from(val: FeedbackArgs) -> Self {
        ProgressInput {
            goal: val.goal,
            completion_percentage: val.percentage,
            total_tasks: val.total,
            completed_tasks: val.completed,
        }
    }
}
