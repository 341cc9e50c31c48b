//! Create `user_account` table with optional FK to `user_role`.
//!
//! Accounts are never physically removed by the API; `status` carries the soft delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccount::Table)
                    .if_not_exists()
                    .col(string_len(UserAccount::Id, 36).primary_key())
                    .col(string_len(UserAccount::Username, 32).unique_key().not_null())
                    .col(string_len(UserAccount::Email, 255).not_null())
                    .col(string_len(UserAccount::FirstName, 128).not_null())
                    .col(string_len(UserAccount::MiddleName, 128).not_null())
                    .col(string_len(UserAccount::LastName, 128).not_null())
                    .col(string_len(UserAccount::Gender, 32).not_null())
                    .col(string_len(UserAccount::PhoneNumber, 32).not_null())
                    .col(string_len(UserAccount::PasswordHash, 255).not_null())
                    .col(string_len(UserAccount::Status, 16).not_null())
                    .col(integer(UserAccount::CountBans).not_null().default(0))
                    // Explicitly nullable: accounts may exist without a role
                    .col(
                        ColumnDef::new(UserAccount::UserRoleId)
                            .integer()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(UserAccount::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(UserAccount::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_account_user_role")
                            .from(UserAccount::Table, UserAccount::UserRoleId)
                            .to(UserRole::Table, UserRole::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserAccount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserAccount {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    MiddleName,
    LastName,
    Gender,
    PhoneNumber,
    PasswordHash,
    Status,
    CountBans,
    UserRoleId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserRole { Table, Id }
