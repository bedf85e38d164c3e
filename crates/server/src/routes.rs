use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, request::Parts, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;

/// Request bodies above this size are rejected as malformed.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Liveness heartbeat for load balancers.
pub async fn ping() -> &'static str {
    "."
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// CORS for browser callers: any http(s) origin, the usual verbs, 5 minute preflight cache.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _parts: &Parts| {
            let origin = origin.as_bytes();
            origin.starts_with(b"http://") || origin.starts_with(b"https://")
        }))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS, Method::PUT])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .max_age(Duration::from_secs(300))
}

/// Build the full application router: heartbeat, health, docs and the auth endpoints.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    let auth_routes = Router::new()
        .route("/authenticate", post(auth::authenticate))
        .route("/register", post(auth::register))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(auth_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
