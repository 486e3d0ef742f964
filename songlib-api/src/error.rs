//! Error types for songlib-api
//!
//! Every failure is rendered as `{"error": "<message>"}`. Store failures
//! are logged with their detail and reach the client as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid id, pagination value or request body (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store or other server-side failure (500); message is client-safe
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store error, logging its detail under `message`
    ///
    /// `NotFound` keeps its meaning; anything else becomes an opaque 500.
    pub fn store(message: &str, err: songlib_common::Error) -> Self {
        match err {
            songlib_common::Error::NotFound(what) => ApiError::NotFound(what),
            other => {
                error!("{}: {}", message, other);
                ApiError::Internal(message.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
