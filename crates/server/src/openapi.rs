use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct AuthenticateRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(ToSchema)]
pub struct UserViewDoc {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct AuthenticateResponse { pub error: bool, pub message: String, pub data: UserViewDoc }

#[derive(ToSchema)]
pub struct RegisterResponse {
    pub error: bool,
    pub message: String,
    /// Identifier assigned to the new user
    pub data: i32,
}

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: bool, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::authenticate,
        crate::routes::auth::register,
    ),
    components(
        schemas(
            HealthResponse,
            AuthenticateRequest,
            RegisterRequest,
            UserViewDoc,
            AuthenticateResponse,
            RegisterResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
