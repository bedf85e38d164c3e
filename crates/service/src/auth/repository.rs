use async_trait::async_trait;
use thiserror::Error;

use super::domain::{Credential, NewCredential};
use super::password;

/// Failures reported by a credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    Conflict,
    #[error("password hashing error: {0}")]
    Hash(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistence abstraction for identity records.
///
/// Implementations must keep `email` unique: `insert` of an existing email
/// fails with [`StoreError::Conflict`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `Ok(None)` when no credential has this email.
    async fn get_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;

    /// Hash the password, persist the record and return the assigned id.
    async fn insert(&self, new: NewCredential) -> Result<i32, StoreError>;

    async fn password_matches(&self, credential: &Credential, plaintext: &str) -> Result<bool, StoreError> {
        password::verify_password_blocking(plaintext.to_string(), credential.password_hash.clone()).await
    }
}
