//! Mapping of store and rendering failures onto HTTP responses.

use aas_dpp_core::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::qr::QrError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Errors surfaced by request handlers.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    Qr(QrError),
    Render(handlebars::RenderError),
    Task(tokio::task::JoinError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<QrError> for ApiError {
    fn from(e: QrError) -> Self {
        ApiError::Qr(e)
    }
}

impl From<handlebars::RenderError> for ApiError {
    fn from(e: handlebars::RenderError) -> Self {
        ApiError::Render(e)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Task(e)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Store(StoreError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Store(StoreError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "validation_failed")
            }
            ApiError::Store(StoreError::BadRequest(_)) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            ApiError::Qr(QrError::InvalidTarget(_)) => (StatusCode::BAD_REQUEST, "invalid_target"),
            ApiError::Qr(_) => (StatusCode::INTERNAL_SERVER_ERROR, "qrcode_error"),
            ApiError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "render_error"),
            ApiError::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Store(e) => e.to_string(),
            ApiError::Qr(e) => e.to_string(),
            ApiError::Render(e) => e.to_string(),
            ApiError::Task(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("{}: {}", error, message);
        }

        (status, Json(ErrorBody { error, message })).into_response()
    }
}
