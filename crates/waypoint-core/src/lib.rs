//! Core library for the Waypoint smart task planner.
//!
//! Users state goals; each goal becomes a [`Plan`] holding a tree of
//! [`Task`]s with deadlines and statuses. On top of the stored plans the
//! crate offers analytics tools (risk scanning, progress, feedback,
//! rescheduling, strategy alternatives, general questions) and a command
//! orchestrator that turns a free-text message into one of those tools.
//!
//! Two collaborators are injected into the [`Planner`]:
//!
//! - a [`store::PlanStore`], by default SQLite in the XDG data directory
//! - a [`llm::TextGenerator`], by default an OpenAI-compatible
//!   chat-completions client
//!
//! Every output type implements [`std::fmt::Display`] as markdown (see
//! [`display`]) and `serde::Serialize` for JSON clients.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{
//!     params::{ConfirmPlan, ListPlans, TaskInput},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .confirm_plan(&ConfirmPlan {
//!         user_id: "alice".to_string(),
//!         goal: "Launch blog".to_string(),
//!         tasks: vec![TaskInput {
//!             title: "Pick a host".to_string(),
//!             deadline: Some("2026-11-01".to_string()),
//!             ..TaskInput::default()
//!         }],
//!     })
//!     .await?;
//! println!("Created plan: {plan}");
//!
//! let plans = planner
//!     .list_plans(&ListPlans {
//!         user_id: "alice".to_string(),
//!     })
//!     .await?;
//! for plan in &plans {
//!     println!("Plan: {}", plan.goal);
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod db;
pub mod display;
pub mod draft;
pub mod error;
pub mod llm;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;
pub mod tools;
pub mod tree;

// Re-export commonly used types
pub use command::{CommandOrchestrator, CommandOutcome, Intent};
pub use db::Database;
pub use display::{CreateResult, DueDate, LocalDateTime, Plans, Tasks, UpdateResult};
pub use error::{CommandStage, PlannerError, Result};
pub use llm::{GeneratorConfig, OpenAiGenerator, TextGenerator};
pub use models::{Plan, PlanDraft, Task, TaskStatus};
pub use planner::{Planner, PlannerBuilder};
pub use store::{PlanStore, SqlitePlanStore};
pub use tools::{Tool, ToolOutput};
