use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login input
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput").field("email", &self.email).finish_non_exhaustive()
    }
}

fn default_active() -> bool { true }

/// Registration input: the credential fields plus optional profile fields.
#[derive(Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// A stored identity. `password_hash` is an Argon2 PHC string.
#[derive(Clone, PartialEq)]
pub struct Credential {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Payload handed to a store on insert; the store hashes `password`.
#[derive(Clone)]
pub struct NewCredential {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
}

impl From<RegisterInput> for NewCredential {
    fn from(input: RegisterInput) -> Self {
        Self {
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
            active: input.active,
        }
    }
}

/// Client-facing view of a credential (business view); never carries the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Credential> for UserView {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            email: c.email,
            first_name: c.first_name,
            last_name: c.last_name,
            active: c.active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
