//! Model-based [`CommandParser`] — an OpenAI-compatible chat endpoint
//! constrained to emit the action schema.
//!
//! The model is instructed to reply with a bare JSON array of action
//! objects. The reply is extracted (tolerating a code fence), deserialized
//! into [`Action`]s, and validated against the domain invariants. Every
//! failure mode — missing credential, network error, timeout, non-success
//! status, malformed or invalid output — surfaces as an error the caller
//! answers by falling back to the rules parser for that single input.

mod config;
mod error;

use std::future::Future;
use std::time::Duration;

use lumo_app::ports::CommandParser;
use lumo_domain::action::Action;
use lumo_domain::error::LumoError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::ModelConfig;
pub use error::ModelParserError;

const SYSTEM_PROMPT: &str = "You control a dimmable tunable-white lamp. \
Reply with a JSON array of actions and nothing else. Each action is one of: \
{\"action\":\"set_power\",\"on\":true|false}, \
{\"action\":\"set_brightness\",\"percent\":0-100}, \
{\"action\":\"set_warmth\",\"warmth\":\"cool\"|\"neutral\"|\"warm\"}. \
Prefer minimal sequences. Use set_power with on=true to turn the lamp on; it \
restores the previous brightness and warmth. If the request is not about the \
lamp, reply with [].";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// [`CommandParser`] implementation backed by a hosted language model.
pub struct OpenAiCommandParser {
    config: ModelConfig,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCommandParser {
    /// Build the parser and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ModelParserError::MissingCredential`] when the config
    /// carries no API key, or an HTTP error when the client cannot be
    /// constructed.
    pub fn new(config: ModelConfig) -> Result<Self, ModelParserError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ModelParserError::MissingCredential)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    async fn request_actions(&self, text: &str) -> Result<Vec<Action>, ModelParserError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ModelParserError::Api {
                status: status.as_u16(),
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(ModelParserError::EmptyCompletion)?;
        debug!(model = %self.config.model, %content, "model completion");
        decode_actions(content)
    }
}

impl CommandParser for OpenAiCommandParser {
    fn parse(&self, text: &str) -> impl Future<Output = Result<Vec<Action>, LumoError>> + Send {
        async move {
            let actions = self.request_actions(text).await?;
            Ok(actions)
        }
    }
}

/// Pull the JSON array out of the completion content, tolerating a code
/// fence or surrounding prose, then deserialize and validate it.
fn decode_actions(content: &str) -> Result<Vec<Action>, ModelParserError> {
    let json = extract_json_array(content).ok_or(ModelParserError::EmptyCompletion)?;
    let actions: Vec<Action> = serde_json::from_str(json)?;
    for action in &actions {
        action.validate()?;
    }
    Ok(actions)
}

fn extract_json_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    (end >= start).then(|| &content[start..=end])
}
