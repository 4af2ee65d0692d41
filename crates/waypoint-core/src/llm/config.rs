//! Text generator configuration.

use std::{env, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for the chat-completions text generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model identifier
    pub model: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL, without the `/v1/...` path
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl GeneratorConfig {
    /// Defaults overridden by `WAYPOINT_LLM_MODEL`, `WAYPOINT_LLM_BASE_URL`
    /// and `WAYPOINT_LLM_TIMEOUT_MS` when they are set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(model) = env::var("WAYPOINT_LLM_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = env::var("WAYPOINT_LLM_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(timeout) = env::var("WAYPOINT_LLM_TIMEOUT_MS") {
            config.timeout_ms = timeout.trim().parse().map_err(|_| PlannerError::Configuration {
                message: format!("WAYPOINT_LLM_TIMEOUT_MS must be a number of milliseconds, got '{timeout}'"),
            })?;
        }

        Ok(config)
    }

    /// Reads the API key from [`GeneratorConfig::api_key_env`].
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env).ok().filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
