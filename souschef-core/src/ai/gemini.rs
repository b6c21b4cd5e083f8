//! Gemini chat backend.
//!
//! Gemini's chat API has no system-role message, so the system prompt is
//! smuggled in as a synthetic opening exchange: a user turn carrying the
//! instructions and a model turn acknowledging them, ahead of the real
//! history. That shim is part of the outbound contract, not an accident.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::{AiConfig, DEFAULT_GEMINI_MODEL};
use super::{ChatProvider, ProviderError};
use crate::types::{ConversationTurn, TurnRole};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API provider.
#[derive(Debug)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: AiConfig) -> Self {
        Self {
            api_key,
            model: config
                .model
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Build the full turn list: synthetic system-prompt exchange, then the
    /// real history, then the new message as the final user turn.
    fn build_contents(
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Vec<GeminiContent> {
        let mut contents = vec![
            GeminiContent::new("user", format!("System instructions: {}", system_prompt)),
            GeminiContent::new("model", "Understood. I'll follow these instructions."),
        ];

        for turn in history {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Assistant => "model",
            };
            contents.push(GeminiContent::new(role, turn.content.clone()));
        }

        contents.push(GeminiContent::new("user", message));
        contents
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn new(role: &'static str, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn send(
        &self,
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, ProviderError> {
        let request = GeminiRequest {
            contents: Self::build_contents(system_prompt, history, message),
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
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
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&body) {
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

        let response: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| ProviderError::ParseError("No text content in response".to_string()))?;

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_becomes_a_synthetic_exchange() {
        let history = vec![ConversationTurn::user("earlier question")];
        let contents = GeminiProvider::build_contents("Be a chef.", &history, "new question");

        assert_eq!(contents.len(), 4);
        assert_eq!(contents[0].role, "user");
        assert_eq!(
            contents[0].parts[0].text,
            "System instructions: Be a chef."
        );
        assert_eq!(contents[1].role, "model");
        assert_eq!(
            contents[1].parts[0].text,
            "Understood. I'll follow these instructions."
        );
        assert_eq!(contents[2].parts[0].text, "earlier question");
        assert_eq!(contents[3].role, "user");
        assert_eq!(contents[3].parts[0].text, "new question");
    }

    #[test]
    fn assistant_turns_map_to_model_role() {
        let history = vec![
            ConversationTurn::user("hi"),
            ConversationTurn::assistant("hello"),
        ];
        let contents = GeminiProvider::build_contents("prompt", &history, "next");

        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[3].role, "model");
    }

    #[test]
    fn history_order_is_preserved() {
        let history: Vec<ConversationTurn> = (0..3)
            .map(|i| ConversationTurn::user(format!("turn {}", i)))
            .collect();
        let contents = GeminiProvider::build_contents("prompt", &history, "last");

        assert_eq!(contents[2].parts[0].text, "turn 0");
        assert_eq!(contents[3].parts[0].text, "turn 1");
        assert_eq!(contents[4].parts[0].text, "turn 2");
    }
}
