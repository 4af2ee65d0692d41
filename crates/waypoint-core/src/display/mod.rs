//! Display formatting for models, tool results and operation outcomes.
//!
//! Domain types implement `Display` directly (in [`models`] and
//! [`reports`]); collections and operation results go through newtype
//! wrappers. Everything renders as markdown, which the CLI shows through
//! termimad and the MCP server returns as text content.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │  (Plan, Task,   │───▶│ Result Types    │───▶│    Output       │
//! │   reports)      │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: collection wrappers ([`Plans`], [`Tasks`])
//! - [`results`]: operation results ([`CreateResult`], [`UpdateResult`])
//! - [`datetime`]: timestamp and deadline formatting
//! - [`models`]: plans, tasks and drafts
//! - [`reports`]: risk, progress, feedback and the other tool results
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{
//!     display::Tasks,
//!     models::{Task, TaskStatus},
//! };
//!
//! let tasks = Tasks(vec![Task::new("Write outline").with_status(TaskStatus::InProgress)]);
//! assert!(tasks.to_string().contains("### Write outline (➤ In Progress)"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod reports;
pub mod results;

pub use collections::{Plans, Tasks};
pub use datetime::{DueDate, LocalDateTime};
pub use results::{CreateResult, UpdateResult};
