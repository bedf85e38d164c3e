use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorEnvelope;
use service::auth::errors::AuthError;
use thiserror::Error;
use tracing::warn;

/// Request failure rendered as `{"error": true, "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match std::error::Error::source(&err) {
            Some(cause) => warn!(code = err.code(), error = %err, cause = %cause, "request failed"),
            None => warn!(code = err.code(), error = %err, "request failed"),
        }
        // every failure of the auth endpoints is reported as 400
        ApiError::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorEnvelope::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
