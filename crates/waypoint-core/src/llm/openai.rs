//! Chat-completions text generator.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::{GeneratorConfig, TextGenerator};
use crate::error::{PlannerError, Result};

const SERVICE: &str = "text generator";
const SYSTEM_PROMPT: &str = "You are a precise assistant for a task planning app. Follow the output format you are asked for exactly.";

/// [`TextGenerator`] backed by an OpenAI-compatible `/v1/chat/completions`
/// endpoint. Each call is a single request bounded by the configured
/// timeout; failures are reported, never retried.
pub struct OpenAiGenerator {
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    http: Client,
}

impl OpenAiGenerator {
    /// Builds a generator from configuration. A missing API key is not an
    /// error here; it surfaces on the first [`TextGenerator::generate`] call
    /// so commands that never reach the generator keep working.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        debug!("from_config: model={} base_url={}", config.model, config.base_url);

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PlannerError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            model: config.model.clone(),
            api_key: config.api_key(),
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.clone(),
            http,
        })
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.7,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            PlannerError::collaborator(SERVICE, format!("{} is not set", self.api_key_env))
        })?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("generate: POST {url} ({} prompt chars)", prompt.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlannerError::collaborator(SERVICE, "request timed out")
                } else {
                    PlannerError::collaborator(SERVICE, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!("generate: API error {status}");
            return Err(PlannerError::collaborator(SERVICE, format!("API returned {status}: {text}")));
        }

        let body: ChatResponse = response.json().await.map_err(|e| PlannerError::Parse {
            what: "chat completion response".to_string(),
            reason: e.to_string(),
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| PlannerError::collaborator(SERVICE, "response contained no choices"))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let config = GeneratorConfig {
            api_key_env: "WAYPOINT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..GeneratorConfig::default()
        };
        let generator = OpenAiGenerator::from_config(&config).expect("client should build without a key");

        let err = generator.generate("hello").await.unwrap_err();
        assert!(matches!(err, PlannerError::Collaborator { .. }));
        assert!(err.to_string().contains("WAYPOINT_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":" hi "}}],"usage":{}}"#)
                .unwrap();
        assert_eq!(body.choices[0].message.content.as_deref(), Some(" hi "));

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }
}
