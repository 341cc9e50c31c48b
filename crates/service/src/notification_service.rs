use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use common::pagination::{Paginated, Pagination};
use models::notification::{self, NewNotification};
use models::user_account;
use crate::{errors::ServiceError, validators};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateNotificationInput {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    #[serde(default)]
    pub action_id: i32,
    pub user_account_id: String,
}

#[derive(Debug, Clone)]
pub struct ReadNotificationsInput {
    pub user_account_id: String,
    pub pagination: Pagination,
    pub include_cleared: bool,
}

/// Clear one notification when `notification_id` is set, otherwise every uncleared one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearNotificationInput {
    pub user_account_id: String,
    #[serde(default)]
    pub notification_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsAndCount {
    pub notifications: Paginated<notification::Model>,
    pub uncleared: u64,
}

async fn ensure_owner(db: &DatabaseConnection, user_account_id: &str) -> Result<(), ServiceError> {
    if user_account::Entity::find_by_id(user_account_id.to_string()).one(db).await?.is_none() {
        return Err(ServiceError::not_found("user account"));
    }
    Ok(())
}

#[instrument(skip(db, input), fields(user_account_id = %input.user_account_id, kind = %input.notification_type))]
pub async fn generate_notification(
    db: &DatabaseConnection,
    input: GenerateNotificationInput,
) -> Result<notification::Model, ServiceError> {
    validators::validate_notification(&input)?;
    ensure_owner(db, &input.user_account_id).await?;
    let created = notification::create(
        db,
        NewNotification {
            title: input.title,
            message: input.message,
            notification_type: input.notification_type,
            action_id: input.action_id,
            user_account_id: input.user_account_id,
        },
    )
    .await?;
    info!(notification_id = created.id, "notification_generated");
    Ok(created)
}

/// Page of an account's notifications, newest first, plus its uncleared total.
pub async fn read_notifications(
    db: &DatabaseConnection,
    input: ReadNotificationsInput,
) -> Result<NotificationsAndCount, ServiceError> {
    ensure_owner(db, &input.user_account_id).await?;
    let (page_idx, per_page) = input.pagination.normalize();

    let owned = notification::Entity::find().filter(notification::Column::UserAccountId.eq(input.user_account_id.as_str()));
    let uncleared = owned.clone().filter(notification::Column::IsCleared.eq(false)).count(db).await?;

    let listed = if input.include_cleared { owned } else { owned.filter(notification::Column::IsCleared.eq(false)) };
    let paginator = listed
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page_idx).await?;
    Ok(NotificationsAndCount {
        notifications: Paginated::new(rows, totals.number_of_items, totals.number_of_pages),
        uncleared,
    })
}

/// Returns `true` when at least one notification changed.
#[instrument(skip(db, input), fields(user_account_id = %input.user_account_id, notification_id = ?input.notification_id))]
pub async fn clear_notification(db: &DatabaseConnection, input: ClearNotificationInput) -> Result<bool, ServiceError> {
    let mut update = notification::Entity::update_many()
        .col_expr(notification::Column::IsCleared, Expr::value(true))
        .col_expr(notification::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(notification::Column::UserAccountId.eq(input.user_account_id.as_str()))
        .filter(notification::Column::IsCleared.eq(false));
    if let Some(id) = input.notification_id {
        update = update.filter(notification::Column::Id.eq(id));
    }
    let res = update.exec(db).await?;
    debug!(rows = res.rows_affected, "notifications_cleared");
    Ok(res.rows_affected > 0)
}
