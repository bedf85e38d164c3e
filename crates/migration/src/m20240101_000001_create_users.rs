//! Create the `users` table holding registrable identities.
//!
//! `email` carries a unique constraint so concurrent registrations of the
//! same address cannot both succeed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(string_len(Users::FirstName, 255).not_null().default(""))
                    .col(string_len(Users::LastName, 255).not_null().default(""))
                    .col(string_len(Users::Password, 255).not_null())
                    .col(boolean(Users::UserActive).not_null().default(true))
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Email, FirstName, LastName, Password, UserActive, CreatedAt, UpdatedAt }
