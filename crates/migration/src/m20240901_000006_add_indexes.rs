use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // UserRole: index on permissions_id
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_permissions")
                    .table(UserRole::Table)
                    .col(UserRole::PermissionsId)
                    .to_owned(),
            )
            .await?;

        // UserAccount: role filter and newest-first listing
        manager
            .create_index(
                Index::create()
                    .name("idx_user_account_user_role")
                    .table(UserAccount::Table)
                    .col(UserAccount::UserRoleId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_user_account_created_at")
                    .table(UserAccount::Table)
                    .col(UserAccount::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // BannedAccount: index on user_account_id
        manager
            .create_index(
                Index::create()
                    .name("idx_banned_account_user_account")
                    .table(BannedAccount::Table)
                    .col(BannedAccount::UserAccountId)
                    .to_owned(),
            )
            .await?;

        // Notification: composite (user_account_id, is_cleared)
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_owner_cleared")
                    .table(Notification::Table)
                    .col(Notification::UserAccountId)
                    .col(Notification::IsCleared)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_role_permissions").table(UserRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_account_user_role").table(UserAccount::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_account_created_at").table(UserAccount::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_banned_account_user_account").table(BannedAccount::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notification_owner_cleared").table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRole { Table, PermissionsId }

#[derive(DeriveIden)]
enum UserAccount { Table, UserRoleId, CreatedAt }

#[derive(DeriveIden)]
enum BannedAccount { Table, UserAccountId }

#[derive(DeriveIden)]
enum Notification { Table, UserAccountId, IsCleared }
