use axum::{extract::State, http::StatusCode, Json};
use common::types::Envelope;
use service::auth::domain::{LoginInput, RegisterInput, UserView};
use service::auth::AuthService;

use crate::errors::ApiError;
use crate::extract::JsonBody;

#[derive(Clone)]
pub struct ServerState {
    pub auth: AuthService,
}

#[utoipa::path(post, path = "/authenticate", tag = "auth", request_body = crate::openapi::AuthenticateRequest, responses((status = 202, description = "Authenticated", body = crate::openapi::AuthenticateResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)))]
pub async fn authenticate(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(StatusCode, Json<Envelope<UserView>>), ApiError> {
    let user = state.auth.authenticate(input).await?;
    let message = format!("Logged in user {}", user.email);
    Ok((StatusCode::ACCEPTED, Json(Envelope::ok(message, UserView::from(user)))))
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered", body = crate::openapi::RegisterResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)))]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<Envelope<i32>>), ApiError> {
    let id = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(format!("User registered with id {id}"), id))))
}
