use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use common::pagination::Pagination;
use models::notification;
use service::auth::domain::AuthUser;
use service::notification_service::{
    self as notifications, ClearNotificationInput, GenerateNotificationInput, NotificationsAndCount,
    ReadNotificationsInput,
};

use super::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiQuery};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    /// Owner account; defaults to the caller
    pub user_account_id: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub include_cleared: Option<bool>,
}

#[derive(Serialize)]
pub struct ClearOutput {
    pub cleared: bool,
}

#[utoipa::path(post, path = "/api/notifications", tag = "notifications", request_body = crate::openapi::GenerateNotificationDoc, responses((status = 200, description = "Generated"), (status = 404, description = "Owner not found")))]
pub async fn generate(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<GenerateNotificationInput>,
) -> Result<Json<notification::Model>, JsonApiError> {
    Ok(Json(notifications::generate_notification(&state.db, input).await?))
}

#[utoipa::path(get, path = "/api/notifications", tag = "notifications", params(NotificationQuery), responses((status = 200, description = "Notifications and uncleared count")))]
pub async fn read(
    State(state): State<ServerState>,
    Extension(caller): Extension<AuthUser>,
    ApiQuery(q): ApiQuery<NotificationQuery>,
) -> Result<Json<NotificationsAndCount>, JsonApiError> {
    let input = ReadNotificationsInput {
        user_account_id: q.user_account_id.unwrap_or(caller.id),
        pagination: Pagination::new(q.page_number.unwrap_or(1), q.page_size.unwrap_or(state.page_size)),
        include_cleared: q.include_cleared.unwrap_or(false),
    };
    Ok(Json(notifications::read_notifications(&state.db, input).await?))
}

#[utoipa::path(put, path = "/api/notifications/clear", tag = "notifications", request_body = crate::openapi::ClearNotificationDoc, responses((status = 200, description = "Whether anything was cleared")))]
pub async fn clear(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ClearNotificationInput>,
) -> Result<Json<ClearOutput>, JsonApiError> {
    let cleared = notifications::clear_notification(&state.db, input).await?;
    Ok(Json(ClearOutput { cleared }))
}
