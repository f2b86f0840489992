use axum::{http::StatusCode, response::IntoResponse, Json};
use jobboard_db::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::validation::{to_payload, ValidationIssue};

/// Top-level API error shared by all route handlers.
///
/// Every handler is a failure boundary: store failures are logged here and
/// leave the process as an opaque 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<ValidationIssue>),
    /// 404 answered with a bare text body.
    #[error("not found: {0}")]
    NotFoundText(String),
    /// 404 answered with `{ message, success: false }`.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Validation(issues) => {
                (StatusCode::BAD_REQUEST, Json(to_payload(&issues))).into_response()
            }
            ApiError::NotFoundText(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": message, "success": false })),
            )
                .into_response(),
            err @ ApiError::Store(_) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn not_found_text(message: impl Into<String>) -> Self {
        Self::NotFoundText(message.into())
    }

    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Self::Validation(issues)
    }
}
