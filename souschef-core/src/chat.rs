//! The chat pipeline: classify, prompt, call the model, extract, wrap up.

use crate::action::classify;
use crate::ai::{prompts, ChatProvider, ProviderError};
use crate::extract::{extract, Extraction};
use crate::types::{ChatEnvelope, ConversationTurn};

/// Run one chat message through the full pipeline.
///
/// Sequential and request-scoped: one classification, one prompt lookup, one
/// provider round-trip, one extraction pass. The provider call is the only
/// await point and the only thing that can fail; extraction always degrades
/// to raw text. No retries here — backoff policy belongs to the boundary.
pub async fn respond(
    provider: &dyn ChatProvider,
    message: &str,
    history: &[ConversationTurn],
) -> Result<ChatEnvelope, ProviderError> {
    let action = classify(message);
    let system_prompt = prompts::system_prompt(action);

    tracing::debug!(
        action = action.as_str(),
        provider = provider.provider_name(),
        history_len = history.len(),
        "dispatching chat message"
    );

    let raw_text = provider.send(system_prompt, history, message).await?;

    let Extraction {
        recipe,
        recipes,
        display_text,
    } = extract(action, &raw_text);

    tracing::debug!(
        action = action.as_str(),
        has_recipe = recipe.is_some(),
        recipe_count = recipes.as_ref().map(Vec::len).unwrap_or(0),
        "extraction finished"
    );

    Ok(ChatEnvelope {
        text: display_text,
        recipe,
        recipes,
        action,
    })
}
