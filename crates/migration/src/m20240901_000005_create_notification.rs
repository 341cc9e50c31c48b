use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(string_len(Notification::Title, 255).not_null())
                    .col(text(Notification::Message).not_null())
                    .col(string_len(Notification::Type, 64).not_null())
                    .col(integer(Notification::ActionId).not_null().default(0))
                    .col(boolean(Notification::IsCleared).not_null().default(false))
                    .col(string_len(Notification::UserAccountId, 36).not_null())
                    .col(timestamp_with_time_zone(Notification::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Notification::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_user_account")
                            .from(Notification::Table, Notification::UserAccountId)
                            .to(UserAccount::Table, UserAccount::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Notification::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Notification { Table, Id, Title, Message, Type, ActionId, IsCleared, UserAccountId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum UserAccount { Table, Id }
