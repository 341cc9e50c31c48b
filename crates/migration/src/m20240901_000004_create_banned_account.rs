//! Create `banned_account` table; rows go away with their account.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BannedAccount::Table)
                    .if_not_exists()
                    .col(pk_auto(BannedAccount::Id))
                    .col(text(BannedAccount::ReasonForBan).not_null())
                    .col(string_len(BannedAccount::UserAccountId, 36).not_null())
                    .col(timestamp_with_time_zone(BannedAccount::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(BannedAccount::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_banned_account_user_account")
                            .from(BannedAccount::Table, BannedAccount::UserAccountId)
                            .to(UserAccount::Table, UserAccount::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BannedAccount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BannedAccount { Table, Id, ReasonForBan, UserAccountId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum UserAccount { Table, Id }
