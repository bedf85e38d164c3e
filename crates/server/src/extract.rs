//! JSON body extractor whose rejections use the error envelope.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use service::auth::errors::AuthError;

use crate::errors::ApiError;

/// Like `axum::Json`, but does not require a `Content-Type` header and turns
/// every decode failure (unreadable or oversized body, bad JSON, missing or
/// mistyped fields, trailing data) into a 400 [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::from(AuthError::Decode(e.body_text())))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::from(AuthError::Decode(e.to_string())))?;
        Ok(JsonBody(value))
    }
}
