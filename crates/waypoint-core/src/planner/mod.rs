//! High-level planner API.
//!
//! [`Planner`] is the entry point used by the CLI and the MCP server. It
//! owns the injected [`PlanStore`] and [`TextGenerator`] and exposes every
//! operation as a method taking a parameter struct from [`crate::params`]:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │    Planner      │    │ PlanStore       │
//! │  (params)       │───▶│ (plan_ops,      │───▶│ TextGenerator   │
//! │                 │    │  command_ops)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`builder`]: factory wiring the store and generator
//! - [`plan_ops`]: drafting, saving, listing and editing plans and tasks
//! - [`command_ops`]: natural-language commands and the analytics tools
//!
//! # Usage
//!
//! ```rust,no_run
//! use waypoint_core::{params::UserMessage, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/waypoint.db"))
//!     .build()
//!     .await?;
//!
//! let outcome = planner
//!     .handle_command(&UserMessage {
//!         user_id: "alice".to_string(),
//!         message: "Any risks this week?".to_string(),
//!     })
//!     .await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::{command::CommandOrchestrator, llm::TextGenerator, store::PlanStore};

pub mod builder;
pub mod command_ops;
pub mod plan_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface.
#[derive(Clone)]
pub struct Planner {
    pub(crate) store: Arc<dyn PlanStore>,
    pub(crate) generator: Arc<dyn TextGenerator>,
    pub(crate) orchestrator: CommandOrchestrator,
}

impl Planner {
    /// Creates a planner over the given collaborators.
    pub fn new(store: Arc<dyn PlanStore>, generator: Arc<dyn TextGenerator>) -> Self {
        let orchestrator = CommandOrchestrator::new(store.clone(), generator.clone());
        Self {
            store,
            generator,
            orchestrator,
        }
    }
}
