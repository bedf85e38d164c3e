//! Argon2 password hashing shared by every credential store.

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;

use super::repository::StoreError;

/// Hash `plaintext` with default Argon2 parameters and a random salt,
/// returning the PHC string to persist.
pub fn hash_password(plaintext: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| StoreError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(plaintext: &str, phc: &str) -> Result<bool, StoreError> {
    let parsed = PasswordHash::new(phc).map_err(|e| StoreError::Hash(e.to_string()))?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(StoreError::Hash(e.to_string())),
    }
}

/// Run [`hash_password`] off the async executor.
pub async fn hash_password_blocking(plaintext: String) -> Result<String, StoreError> {
    tokio::task::spawn_blocking(move || hash_password(&plaintext))
        .await
        .map_err(|e| StoreError::Hash(e.to_string()))?
}

/// Run [`verify_password`] off the async executor.
pub async fn verify_password_blocking(plaintext: String, phc: String) -> Result<bool, StoreError> {
    tokio::task::spawn_blocking(move || verify_password(&plaintext, &phc))
        .await
        .map_err(|e| StoreError::Hash(e.to_string()))?
}
