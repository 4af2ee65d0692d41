//! Natural-language command handling.
//!
//! A message is classified into an [`Intent`] by [`classify`], then the
//! [`CommandOrchestrator`] runs the selected tool and, when the intent asks
//! for it, feeds a progress summary into the feedback generator.

mod intent;
mod orchestrator;

pub use intent::{classify, Intent};
pub use orchestrator::{CommandOrchestrator, CommandOutcome};
