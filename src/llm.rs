//! Completion capability: client for OpenAI-compatible chat backends
//!
//! The resolver talks to the upstream model only through the
//! [`CompletionClient`] trait, so tests substitute a canned double and no
//! other module knows which vendor sits behind the endpoint.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

use crate::config::CompletionConfig;
use crate::{Error, Result};

/// Bound on one completion round trip; a timeout surfaces as the
/// provider-unavailable condition
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// One role-tagged message in a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    // No `skip_serializing_if`: the backend rejects messages without a
    // `content` key, so an empty string must still serialize.
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Capability boundary for text completion: submit a system prompt and the
/// user text, receive the generated reply
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String>;
}

/// OpenAI-compatible chat-completions client (DeepSeek by default)
pub struct DeepSeekClient {
    client: Client,
    config: CompletionConfig,
}

impl DeepSeekClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder().timeout(COMPLETION_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for DeepSeekClient {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_text),
            ],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Completion(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Completion backend returned an error");
            return Err(Error::Completion(format!("upstream status {}", status)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("unreadable response: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Completion("empty response".to_string()))?;

        Ok(choice.message.content)
    }
}
