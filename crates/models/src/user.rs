use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub user_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new row; `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
    pub active: bool,
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn create(db: &DatabaseConnection, new: NewUser<'_>) -> Result<Model, ModelError> {
    if new.password_hash.trim().is_empty() { return Err(ModelError::Validation("password hash required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        email: Set(new.email.to_string()),
        first_name: Set(new.first_name.to_string()),
        last_name: Set(new.last_name.to_string()),
        password: Set(new.password_hash.to_string()),
        user_active: Set(new.active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
