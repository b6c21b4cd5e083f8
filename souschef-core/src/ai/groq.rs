//! Groq chat backend (OpenAI-compatible chat completions API).
//!
//! Unlike Gemini, this backend has a native system role, so the prompt is
//! forwarded honestly: one system message, the history role-for-role, then
//! the new user message.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::{AiConfig, DEFAULT_GROQ_MODEL};
use super::{ChatProvider, ProviderError};
use crate::types::{ConversationTurn, TurnRole};

const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq API provider.
#[derive(Debug)]
pub struct GroqProvider {
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(api_key: String, config: AiConfig) -> Self {
        Self {
            api_key,
            model: config.model.unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client: reqwest::Client::new(),
        }
    }

    fn build_messages(
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Vec<WireMessage> {
        let mut messages = vec![WireMessage::new("system", system_prompt)];

        for turn in history {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Assistant => "assistant",
            };
            messages.push(WireMessage::new(role, turn.content.clone()));
        }

        messages.push(WireMessage::new("user", message));
        messages
    }
}

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl WireMessage {
    fn new(role: &'static str, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct GroqChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqApiError,
}

#[derive(Debug, Deserialize)]
struct GroqApiError {
    message: String,
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn send(
        &self,
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, ProviderError> {
        let request = GroqRequest {
            model: self.model.clone(),
            messages: Self::build_messages(system_prompt, history, message),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if status != 200 {
            if let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(&body) {
                return Err(ProviderError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(ProviderError::ApiError {
                status,
                message: body,
            });
        }

        let response: GroqResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // An empty choice list or null content degrades to an empty reply,
        // which the extractor then passes through as raw text.
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_leads_the_message_list() {
        let history = vec![
            ConversationTurn::user("hi"),
            ConversationTurn::assistant("hello"),
        ];
        let messages = GroqProvider::build_messages("Be a chef.", &history, "what's for dinner?");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "Be a chef.");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "what's for dinner?");
    }

    #[test]
    fn defaults_match_the_wire_contract() {
        let provider = GroqProvider::new("key".to_string(), AiConfig::default());
        assert_eq!(provider.model_name(), "llama-3.3-70b-versatile");
        assert_eq!(provider.temperature, 0.7);
        assert_eq!(provider.max_tokens, 4096);
    }

    #[test]
    fn model_override_is_honored() {
        let config = AiConfig {
            model: Some("llama-3.1-8b-instant".to_string()),
            ..AiConfig::default()
        };
        let provider = GroqProvider::new("key".to_string(), config);
        assert_eq!(provider.model_name(), "llama-3.1-8b-instant");
    }
}
