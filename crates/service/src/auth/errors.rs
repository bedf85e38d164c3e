use thiserror::Error;

use crate::audit::AuditError;

/// Business errors for the authentication and registration flows.
///
/// The `Display` text is what callers see, so variants never embed store or
/// transport details.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid request payload: {0}")]
    Decode(String),
    /// Unknown email, wrong password and hashing failures all collapse here.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user already exists with this email")]
    DuplicateUser,
    #[error("error while registering user, please try again")]
    RegistrationFailed,
    #[error("unable to record audit event")]
    AuditDeliveryFailed(#[source] AuditError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Decode(_) => 1001,
            AuthError::InvalidCredentials => 1004,
            AuthError::DuplicateUser => 1002,
            AuthError::RegistrationFailed => 1200,
            AuthError::AuditDeliveryFailed(_) => 1300,
        }
    }
}
