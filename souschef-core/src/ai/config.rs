//! Provider configuration from environment variables.

use std::env;

/// Default backend when `AI_PROVIDER` is unset or unrecognized.
pub const DEFAULT_PROVIDER: ProviderKind = ProviderKind::Groq;

/// Default Groq model.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

/// Default sampling temperature for the completion-style backend.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output token bound for the completion-style backend.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Which completion backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Groq,
}

impl ProviderKind {
    /// Parse a provider name, falling back to the default for anything
    /// unrecognized rather than erroring.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gemini" => ProviderKind::Gemini,
            "groq" => ProviderKind::Groq,
            _ => DEFAULT_PROVIDER,
        }
    }
}

/// Provider configuration.
///
/// Read from environment variables:
///
/// - `AI_PROVIDER` (optional): "gemini" | "groq" (default: "groq")
/// - `SOUSCHEF_AI_MODEL` (optional): model name override, provider-specific
/// - `SOUSCHEF_AI_TEMPERATURE` (optional): sampling temperature (default: 0.7)
/// - `SOUSCHEF_AI_MAX_TOKENS` (optional): output token bound (default: 4096)
///
/// API keys (`GEMINI_API_KEY` / `GROQ_API_KEY`) are read separately when the
/// provider is constructed, so their absence is reported per-request instead
/// of failing process start.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub kind: ProviderKind,
    /// Model name override; each provider falls back to its own default.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl AiConfig {
    pub fn from_env() -> Self {
        let kind = env::var("AI_PROVIDER")
            .map(|v| ProviderKind::parse(&v))
            .unwrap_or(DEFAULT_PROVIDER);

        let model = env::var("SOUSCHEF_AI_MODEL").ok().filter(|m| !m.is_empty());

        let temperature = env::var("SOUSCHEF_AI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = env::var("SOUSCHEF_AI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        Self {
            kind,
            model,
            temperature,
            max_tokens,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            kind: DEFAULT_PROVIDER,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_parse() {
        assert_eq!(ProviderKind::parse("gemini"), ProviderKind::Gemini);
        assert_eq!(ProviderKind::parse("groq"), ProviderKind::Groq);
        assert_eq!(ProviderKind::parse("GEMINI"), ProviderKind::Gemini);
    }

    #[test]
    fn unrecognized_provider_falls_back_to_default() {
        assert_eq!(ProviderKind::parse("openai"), DEFAULT_PROVIDER);
        assert_eq!(ProviderKind::parse(""), DEFAULT_PROVIDER);
    }

    #[test]
    fn default_config_matches_wire_contract() {
        let config = AiConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 4096);
        assert!(config.model.is_none());
    }
}
