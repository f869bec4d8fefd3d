//! Model parser configuration.

use serde::Deserialize;

/// Configuration for the model-based parser.
///
/// The API credential never lives in the config file; it is read from the
/// environment. An absent credential simply means the model path is
/// unavailable and the interactive loop runs rules-only.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier sent to the service.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Request timeout in seconds; on expiry the caller falls back to the
    /// rules parser for that input.
    pub timeout_secs: u64,
    /// API credential, environment-only.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 15,
            api_key: None,
        }
    }
}

impl ModelConfig {
    /// Apply environment overrides: `OPENAI_API_KEY` and `OPENAI_MODEL`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            if !val.is_empty() {
                self.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("OPENAI_MODEL") {
            if !val.is_empty() {
                self.model = val;
            }
        }
    }

    /// Whether the model path can be used at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
