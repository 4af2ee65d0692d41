//! Free-text generation.
//!
//! Everything that needs a language model (drafting task lists, picking the
//! goal a message refers to, answering general questions, refining a task)
//! goes through the [`TextGenerator`] trait. The generator is injected into
//! the [`crate::Planner`] when it is built; nothing in this crate creates a
//! client on its own.

use async_trait::async_trait;

use crate::error::Result;

mod config;
mod openai;

pub use config::GeneratorConfig;
pub use openai::OpenAiGenerator;

/// Prompt in, free text out.
///
/// Each call is independent; no conversation state is kept between calls.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text for `prompt`. Failures and timeouts are
    /// reported as [`crate::PlannerError::Collaborator`].
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::error::PlannerError;

    /// Replays canned answers in order and records the prompts it saw.
    pub struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String>>>,
        prompts: Mutex<Vec<String>>,
        call_count: AtomicUsize,
    }

    impl ScriptedGenerator {
        pub fn new<I, S>(responses: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self::with_results(responses.into_iter().map(|r| Ok(r.into())))
        }

        pub fn with_results<I>(responses: I) -> Self
        where
            I: IntoIterator<Item = Result<String>>,
        {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                prompts: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// A generator that fails every call.
        pub fn failing() -> Self {
            Self::with_results(Vec::new())
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PlannerError::collaborator("text generator", "no scripted response left")))
        }
    }
}
