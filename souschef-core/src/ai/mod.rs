//! Provider adapter for the chat completion backends.
//!
//! Wraps the interchangeable text-completion services (Gemini, Groq) behind
//! one [`ChatProvider`] trait. The backend is selected by the `AI_PROVIDER`
//! environment variable and the process holds a single lazily-built client,
//! shared across requests.

mod config;
mod fake;
mod gemini;
mod groq;
pub mod prompts;

pub use config::{AiConfig, ProviderKind};
pub use fake::FakeProvider;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::types::ConversationTurn;

/// Error type for provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether this error should be surfaced to the caller as "try again
    /// shortly" rather than a generic failure.
    ///
    /// Neither backend guarantees a structured rate-limit signal once an error
    /// has been stringified, so alongside the structured [`ProviderError::RateLimited`]
    /// variant this sniffs the error text for the known quota signatures. The
    /// matching strings live only here; update them here, not at call sites.
    pub fn is_rate_limited(&self) -> bool {
        if matches!(self, ProviderError::RateLimited { .. }) {
            return true;
        }
        let text = self.to_string();
        text.contains("429")
            || text.to_lowercase().contains("quota")
            || text.contains("Too Many Requests")
    }

    /// Whether this is a missing-credential error the boundary should report
    /// as a server configuration problem.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ProviderError::NotConfigured(_))
    }
}

/// Trait for chat completion providers.
///
/// Implementations are stateless apart from their HTTP client and must be
/// safe to share across concurrent requests.
#[async_trait]
pub trait ChatProvider: Send + Sync + fmt::Debug {
    /// Send one message with its system prompt and prior history, returning
    /// the model's raw text reply.
    async fn send(
        &self,
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, ProviderError>;

    /// Provider name (e.g., "gemini", "groq", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name (e.g., "llama-3.3-70b-versatile").
    fn model_name(&self) -> &str;
}

/// Build a provider from environment configuration.
///
/// The credential for the selected backend is required here, at construction,
/// so an unconfigured deployment fails on the first chat request rather than
/// at process start.
pub fn create_provider_from_env() -> Result<Box<dyn ChatProvider>, ProviderError> {
    let config = AiConfig::from_env();

    match config.kind {
        ProviderKind::Gemini => {
            let api_key = std::env::var("GEMINI_API_KEY")
                .map_err(|_| ProviderError::NotConfigured("GEMINI_API_KEY not set".to_string()))?;
            Ok(Box::new(GeminiProvider::new(api_key, config)))
        }
        ProviderKind::Groq => {
            let api_key = std::env::var("GROQ_API_KEY")
                .map_err(|_| ProviderError::NotConfigured("GROQ_API_KEY not set".to_string()))?;
            Ok(Box::new(GroqProvider::new(api_key, config)))
        }
    }
}

static SHARED_PROVIDER: OnceCell<Arc<dyn ChatProvider>> = OnceCell::new();

/// The process-wide provider handle, built on first use.
///
/// `get_or_try_init` serializes concurrent first calls, so two requests
/// racing on a cold process cannot construct two clients. A failed
/// construction leaves the cell empty and the next request retries.
pub fn shared_provider() -> Result<Arc<dyn ChatProvider>, ProviderError> {
    SHARED_PROVIDER
        .get_or_try_init(|| create_provider_from_env().map(Arc::from))
        .cloned()
}
