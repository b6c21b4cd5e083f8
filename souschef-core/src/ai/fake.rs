//! Fake chat provider for testing.
//!
//! Returns deterministic responses based on substring matching against the
//! system prompt and message, allowing tests to run without network access
//! or API costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{ChatProvider, ProviderError};
use crate::types::ConversationTurn;

/// A fake chat provider for testing.
///
/// Responses are matched by checking whether the system prompt or the user
/// message contains a registered substring. If nothing matches, the default
/// response is returned, or an error if none is set.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// When set, every call fails with this error's text.
    failure: Option<String>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
            failure: None,
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            failure: None,
        }
    }

    /// Create a FakeProvider that returns `response` when the system prompt
    /// or message contains `pattern`.
    pub fn with_response(pattern: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(pattern, response);
        provider
    }

    /// Create a FakeProvider whose every call fails with the given message.
    /// Useful for exercising the boundary's error mapping.
    pub fn failing_with(message: &str) -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            failure: Some(message.to_string()),
        }
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, pattern: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(pattern.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

#[async_trait]
impl ChatProvider for FakeProvider {
    async fn send(
        &self,
        system_prompt: &str,
        _history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, ProviderError> {
        if let Some(failure) = &self.failure {
            return Err(ProviderError::RequestFailed(failure.clone()));
        }

        let haystack = format!("{}\n{}", system_prompt, message).to_lowercase();

        let responses = self.responses.read().unwrap();
        for (pattern, response) in responses.iter() {
            if haystack.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(ProviderError::RequestFailed(format!(
                "FakeProvider: No response configured for message (first 100 chars): {}",
                &message[..message.len().min(100)]
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
