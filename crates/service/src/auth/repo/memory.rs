use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::domain::{Credential, NewCredential};
use crate::auth::password;
use crate::auth::repository::{CredentialStore, StoreError};

/// Process-local store keyed by email. Ids start at 1 and are never reused.
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, Credential>>,
    next_id: AtomicI32,
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self { users: RwLock::new(HashMap::new()), next_id: AtomicI32::new(1) }
    }
}

impl InMemoryCredentialStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("credential map lock poisoned".into())
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, new: NewCredential) -> Result<i32, StoreError> {
        // hash before taking the lock; argon2 is slow on purpose
        let password_hash = password::hash_password_blocking(new.password).await?;
        let mut users = self.users.write().map_err(poisoned)?;
        if users.contains_key(&new.email) {
            return Err(StoreError::Conflict);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let credential = Credential {
            id,
            email: new.email.clone(),
            first_name: new.first_name,
            last_name: new.last_name,
            active: new.active,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(new.email, credential);
        Ok(id)
    }
}
