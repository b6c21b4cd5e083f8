//! Unauthenticated health-check endpoint for deploy probes.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /api/test endpoints (mounted at /api/test)
pub fn router() -> Router {
    Router::new().route("/unauthed-ping", get(unauthed_ping))
}

#[derive(OpenApi)]
#[openapi(paths(unauthed_ping), components(schemas(PingResponse)))]
pub struct ApiDoc;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/test/unauthed-ping",
    tag = "testing",
    responses(
        (status = 200, description = "Ping response", body = PingResponse)
    )
)]
pub async fn unauthed_ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}
