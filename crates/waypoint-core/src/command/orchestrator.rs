//! Classify, dispatch, chain.

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, info};
use serde::Serialize;

use super::intent::{classify, Intent};
use crate::{
    error::{CommandStage, PlannerError, Result},
    llm::TextGenerator,
    models::Feedback,
    store::PlanStore,
    tools::{Tool, ToolContext, ToolOutput},
};

/// Outcome of a natural-language command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutcome {
    /// Progress was requested with chaining; only the derived feedback is
    /// returned.
    Feedback { feedback: Feedback },
    /// Any other tool: its wire name and its result.
    Action {
        interpreted_action: String,
        result: ToolOutput,
    },
}

/// Runs natural-language commands against a store and a text generator.
#[derive(Clone)]
pub struct CommandOrchestrator {
    store: Arc<dyn PlanStore>,
    generator: Arc<dyn TextGenerator>,
}

impl CommandOrchestrator {
    pub fn new(store: Arc<dyn PlanStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// Handles `message` on behalf of `user_id` at the current time.
    pub async fn handle(&self, user_id: &str, message: &str) -> Result<CommandOutcome> {
        self.handle_at(user_id, message, Timestamp::now()).await
    }

    /// Handles `message` with `now` as the reference time for deadline
    /// arithmetic.
    pub async fn handle_at(&self, user_id: &str, message: &str, now: Timestamp) -> Result<CommandOutcome> {
        if user_id.trim().is_empty() {
            return Err(PlannerError::invalid_input("user_id").with_reason("must not be empty"));
        }
        if message.trim().is_empty() {
            return Err(PlannerError::invalid_input("message").with_reason("must not be empty"));
        }

        let intent = classify(message, user_id);
        info!("Command from {user_id} interpreted as {}", intent.tool.name());
        self.execute(intent, now).await
    }

    /// Runs an intent in its wire shape
    /// (`{"tool": ..., "params": {...}, "needs_chaining": ...}`). Decoding
    /// failures are reported at the interpretation stage.
    pub async fn handle_wire(&self, intent: &serde_json::Value, now: Timestamp) -> Result<CommandOutcome> {
        let intent = Intent::from_wire(intent).map_err(|e| e.at_stage(CommandStage::Interpretation))?;
        self.execute(intent, now).await
    }

    /// Runs a single tool without chaining.
    pub async fn run_tool(&self, tool: Tool, now: Timestamp) -> Result<ToolOutput> {
        tool.run(self.context(now)).await
    }

    /// Dispatches the intent's tool and, for chained progress requests,
    /// feeds the summary into the feedback tool.
    pub async fn execute(&self, intent: Intent, now: Timestamp) -> Result<CommandOutcome> {
        let Intent { tool, chain } = intent;
        let name = tool.name();

        let output = self
            .run_tool(tool, now)
            .await
            .map_err(|e| e.at_stage(CommandStage::ToolExecution))?;

        match output {
            ToolOutput::Progress(progress) if chain => {
                debug!("execute: chaining {name} into provide_feedback");
                let chained = self
                    .run_tool(Tool::ProvideFeedback { progress }, now)
                    .await
                    .map_err(|e| e.at_stage(CommandStage::FeedbackGeneration))?;
                match chained {
                    ToolOutput::Feedback { feedback } => Ok(CommandOutcome::Feedback { feedback }),
                    other => Err(PlannerError::dispatch(
                        "provide_feedback",
                        format!("unexpected output {other:?}"),
                    )
                    .at_stage(CommandStage::FeedbackGeneration)),
                }
            }
            result => Ok(CommandOutcome::Action {
                interpreted_action: name.to_string(),
                result,
            }),
        }
    }

    fn context(&self, now: Timestamp) -> ToolContext<'_> {
        ToolContext {
            store: self.store.as_ref(),
            generator: self.generator.as_ref(),
            now,
        }
    }
}
