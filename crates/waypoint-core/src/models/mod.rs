//! Data models for plans and tasks.
//!
//! A [`Plan`] is a user's goal plus an ordered list of top-level [`Task`]s,
//! each of which may own nested subtasks. Plans are the unit of persistence;
//! everything else in this module ([`RiskItem`], [`ProgressSummary`],
//! [`Feedback`], ...) is derived on demand and never stored.
//!
//! Display implementations for these models live in
//! [`crate::display`] to keep data and presentation apart.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{Task, TaskStatus};
//!
//! let task = Task::new("Write outline")
//!     .with_status(TaskStatus::Completed)
//!     .with_subtask(Task::new("Pick a title"));
//!
//! assert!(task.status.is_completed());
//! assert_eq!(task.subtasks.len(), 1);
//! ```

pub mod plan;
pub mod status;
pub mod summary;
pub mod task;


pub use plan::Plan;
pub use status::TaskStatus;
pub use summary::{
    AlternativePlans, Feedback, FeedbackSummary, GoalAlternatives, PlanDraft, ProgressSummary,
    QueryAnswer, RescheduleResult, RiskItem, RiskReport, StrategyOption,
};
pub use task::Task;
