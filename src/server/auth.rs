//! Shared-secret check for write endpoints.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::AppState;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Auth error response
#[derive(Serialize)]
struct AuthError {
    error: &'static str,
    message: &'static str,
}

/// Rejects requests whose `X-API-Key` does not match the configured key.
///
/// With no key configured every request passes.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let matches = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|key| key == expected);

    match matches {
        Some(true) => next.run(request).await,
        Some(false) => {
            tracing::warn!("Rejected write with invalid API key");
            (
                StatusCode::UNAUTHORIZED,
                Json(AuthError {
                    error: "invalid_key",
                    message: "Invalid API key",
                }),
            )
                .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(AuthError {
                error: "missing_key",
                message: "X-API-Key header required",
            }),
        )
            .into_response(),
    }
}
