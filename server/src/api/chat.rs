//! The chat endpoint: one message in, one AI envelope out.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use souschef_core::ai::shared_provider;
use souschef_core::types::{ChatEnvelope, ConversationTurn, ExtractedRecipe};
use souschef_core::{respond, ProviderError};

use crate::api::ErrorResponse;

/// Returns the router for the AI chat endpoint (mounted at /api/ai)
pub fn router() -> Router {
    Router::new().route("/", post(send_message))
}

#[derive(OpenApi)]
#[openapi(paths(send_message), components(schemas(ChatRequestBody, ChatReply)))]
pub struct ApiDoc;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequestBody {
    /// The user's chat message.
    #[serde(default)]
    pub message: Option<String>,
    /// Prior conversation turns, oldest first.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub history: Vec<ConversationTurn>,
}

/// The response envelope: display text plus any structured recipe data the
/// model's reply yielded. At most one of `recipe` / `recipes` is set.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    pub text: String,
    #[schema(value_type = Option<Object>)]
    pub recipe: Option<ExtractedRecipe>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub recipes: Option<Vec<ExtractedRecipe>>,
    pub action: String,
}

impl From<ChatEnvelope> for ChatReply {
    fn from(envelope: ChatEnvelope) -> Self {
        Self {
            text: envelope.text,
            recipe: envelope.recipe,
            recipes: envelope.recipes,
            action: envelope.action.as_str().to_string(),
        }
    }
}

/// Map a provider failure to the status and body the client sees. The
/// rate-limit case gets its own status and message so the UI can say
/// "try again shortly" instead of a generic failure.
fn provider_error_response(err: &ProviderError) -> (StatusCode, ErrorResponse) {
    if err.is_rate_limited() {
        (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorResponse::with_details(
                "AI rate limit reached. Please wait a moment and try again.",
                err.to_string(),
            ),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::with_details("Failed to process AI request", err.to_string()),
        )
    }
}

/// Send a chat message to the AI assistant
#[utoipa::path(
    post,
    path = "/api/ai",
    tag = "chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "AI reply with optional extracted recipe data", body = ChatReply),
        (status = 400, description = "Missing message", body = ErrorResponse),
        (status = 429, description = "AI provider rate limit reached", body = ErrorResponse),
        (status = 500, description = "AI provider unconfigured or failed", body = ErrorResponse)
    )
)]
pub async fn send_message(Json(body): Json<ChatRequestBody>) -> impl IntoResponse {
    let message = match body.message.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(m) => m.to_string(),
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Message is required")),
            )
                .into_response();
        }
    };

    let provider = match shared_provider() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("AI provider unavailable: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("AI service not configured")),
            )
                .into_response();
        }
    };

    match respond(provider.as_ref(), &message, &body.history).await {
        Ok(envelope) => (StatusCode::OK, Json(ChatReply::from(envelope))).into_response(),
        Err(e) => {
            tracing::warn!("AI call failed: {}", e);
            let (status, error) = provider_error_response(&e);
            (status, Json(error)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_errors_map_to_429() {
        let err = ProviderError::RateLimited {
            retry_after_secs: None,
        };
        let (status, body) = provider_error_response(&err);
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body.error.contains("rate limit"));
        assert!(body.details.is_some());
    }

    #[test]
    fn quota_text_in_a_generic_error_still_maps_to_429() {
        let err = ProviderError::RequestFailed("upstream said 429".to_string());
        let (status, _) = provider_error_response(&err);
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn other_failures_map_to_500() {
        let err = ProviderError::ApiError {
            status: 503,
            message: "backend down".to_string(),
        };
        let (status, body) = provider_error_response(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to process AI request");
    }

    #[test]
    fn reply_serializes_null_structured_fields() {
        let reply = ChatReply {
            text: "hi".to_string(),
            recipe: None,
            recipes: None,
            action: "general_chat".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json["recipe"].is_null());
        assert!(json["recipes"].is_null());
        assert_eq!(json["action"], "general_chat");
    }
}
