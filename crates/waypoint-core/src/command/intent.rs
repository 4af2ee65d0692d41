//! Mapping free-text messages to tool invocations.

use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    tools::Tool,
};

/// A classified message: the tool to run and whether its result should be
/// fed into the feedback generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub tool: Tool,
    pub chain: bool,
}

impl Intent {
    fn single(tool: Tool) -> Self {
        Self { tool, chain: false }
    }

    /// Decodes the wire shape
    /// `{"tool": <name>, "params": {...}, "needs_chaining": <bool>}`.
    ///
    /// A non-object value or a missing `tool` name is a
    /// [`PlannerError::Classification`] error; an unknown name or bad
    /// parameters is a [`PlannerError::Dispatch`] error.
    pub fn from_wire(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| PlannerError::Classification {
            reason: "intent must be a JSON object".to_string(),
        })?;

        let name = object
            .get("tool")
            .and_then(Value::as_str)
            .ok_or_else(|| PlannerError::Classification {
                reason: "intent has no tool name".to_string(),
            })?;

        let empty = Value::Object(serde_json::Map::new());
        let params = object.get("params").unwrap_or(&empty);
        let chain = object
            .get("needs_chaining")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            tool: Tool::from_wire(name, params)?,
            chain,
        })
    }
}

/// Classifies `message` by case-insensitive keyword, first match wins:
/// "behind" reschedules, "risk" analyzes risks, "faster" suggests
/// alternatives, "progress" or "feedback" reports progress with feedback
/// chained, anything else is a general query.
pub fn classify(message: &str, user_id: &str) -> Intent {
    let lowered = message.to_lowercase();
    let user_id = user_id.to_string();

    if lowered.contains("behind") {
        Intent::single(Tool::ReschedulePlan {
            user_id,
            message: message.to_string(),
        })
    } else if lowered.contains("risk") {
        Intent::single(Tool::AnalyzeRisks {
            user_id,
            threshold_days: None,
        })
    } else if lowered.contains("faster") {
        Intent::single(Tool::GenerateAlternativePlans { user_id })
    } else if lowered.contains("progress") || lowered.contains("feedback") {
        Intent {
            tool: Tool::GetUserProgress {
                user_id,
                plan_id: None,
                message: Some(message.to_string()),
            },
            chain: true,
        }
    } else {
        Intent::single(Tool::HandleGeneralQuery {
            user_id,
            message: message.to_string(),
        })
    }
}
