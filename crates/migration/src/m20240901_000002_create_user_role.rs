//! Create `user_role` table with FK to `permissions`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(pk_auto(UserRole::Id))
                    .col(string_len(UserRole::RoleName, 64).not_null())
                    .col(boolean(UserRole::IsSuperAdmin).not_null().default(false))
                    .col(integer(UserRole::PermissionsId).not_null())
                    .col(timestamp_with_time_zone(UserRole::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(UserRole::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_permissions")
                            .from(UserRole::Table, UserRole::PermissionsId)
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserRole::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserRole { Table, Id, RoleName, IsSuperAdmin, PermissionsId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Permissions { Table, Id }
