use sea_orm::DatabaseConnection;

use crate::auth::domain::{Credential, NewCredential};
use crate::auth::password;
use crate::auth::repository::{CredentialStore, StoreError};
use models::errors::ModelError;
use models::user::{self, NewUser};

pub struct SeaOrmCredentialStore {
    pub db: DatabaseConnection,
}

fn to_credential(u: user::Model) -> Credential {
    Credential {
        id: u.id,
        email: u.email,
        first_name: u.first_name,
        last_name: u.last_name,
        active: u.user_active,
        password_hash: u.password,
        created_at: u.created_at.into(),
        updated_at: u.updated_at.into(),
    }
}

fn store_error(e: ModelError) -> StoreError {
    match e {
        ModelError::Conflict(_) => StoreError::Conflict,
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait::async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let found = user::find_by_email(&self.db, email).await.map_err(store_error)?;
        Ok(found.map(to_credential))
    }

    async fn insert(&self, new: NewCredential) -> Result<i32, StoreError> {
        let password_hash = password::hash_password_blocking(new.password).await?;
        let created = user::create(&self.db, NewUser {
            email: &new.email,
            first_name: &new.first_name,
            last_name: &new.last_name,
            password_hash: &password_hash,
            active: new.active,
        })
        .await
        .map_err(store_error)?;
        Ok(created.id)
    }
}
