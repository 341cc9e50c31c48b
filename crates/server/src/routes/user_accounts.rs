use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use common::pagination::Paginated;
use models::{banned_account, user_account::{self, UserStatus}};
use service::user_account_service::{
    self as accounts, AccountDetails, CreateUserAccountInput, UpdateUserAccountInput, UserAccountFilter,
};

use super::auth::ServerState;
use super::PageQuery;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountListQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    /// Substring of username or email
    pub keyword: Option<String>,
    #[param(value_type = Option<String>)]
    pub status: Option<UserStatus>,
    pub user_role_id: Option<i32>,
    pub role_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub reason_for_ban: String,
}

#[utoipa::path(post, path = "/api/user-accounts", tag = "user-accounts", request_body = crate::openapi::CreateUserAccountDoc, responses((status = 200, description = "Created"), (status = 400, description = "Bad Request"), (status = 404, description = "Role not found"), (status = 409, description = "Username taken")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateUserAccountInput>,
) -> Result<Json<AccountDetails>, JsonApiError> {
    let created = accounts::create_user_account(&state.db, input).await?;
    info!(user_account_id = %created.account.id, "account created via api");
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/user-accounts", tag = "user-accounts", params(AccountListQuery), responses((status = 200, description = "Page of accounts")))]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<AccountListQuery>,
) -> Result<Json<Paginated<AccountDetails>>, JsonApiError> {
    let page = PageQuery { page_number: q.page_number, page_size: q.page_size }.pagination(state.page_size);
    let filter = UserAccountFilter { status: q.status, user_role_id: q.user_role_id, role_name: q.role_name, keyword: q.keyword };
    Ok(Json(accounts::read_user_accounts(&state.db, page, filter).await?))
}

#[utoipa::path(put, path = "/api/user-accounts", tag = "user-accounts", request_body = crate::openapi::UpdateUserAccountDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Username taken")))]
pub async fn update(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<UpdateUserAccountInput>,
) -> Result<Json<AccountDetails>, JsonApiError> {
    Ok(Json(accounts::update_user_account(&state.db, input).await?))
}

#[utoipa::path(get, path = "/api/user-accounts/{id}", tag = "user-accounts", params(("id" = String, Path, description = "Account id")), responses((status = 200, description = "Account"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<Json<AccountDetails>, JsonApiError> {
    Ok(Json(accounts::read_user_account_by_id(&state.db, &id).await?))
}

#[utoipa::path(delete, path = "/api/user-accounts/{id}", tag = "user-accounts", params(("id" = String, Path, description = "Account id")), responses((status = 200, description = "Marked deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<Json<user_account::Model>, JsonApiError> {
    Ok(Json(accounts::delete_user_account(&state.db, &id).await?))
}

#[utoipa::path(put, path = "/api/user-accounts/{id}/activate", tag = "user-accounts", params(("id" = String, Path, description = "Account id")), responses((status = 200, description = "Activated"), (status = 404, description = "Not Found")))]
pub async fn activate(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<Json<user_account::Model>, JsonApiError> {
    Ok(Json(accounts::activate_user_account(&state.db, &id).await?))
}

#[utoipa::path(put, path = "/api/user-accounts/{id}/deactivate", tag = "user-accounts", params(("id" = String, Path, description = "Account id")), responses((status = 200, description = "Deactivated"), (status = 404, description = "Not Found")))]
pub async fn deactivate(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<Json<user_account::Model>, JsonApiError> {
    Ok(Json(accounts::deactivate_user_account(&state.db, &id).await?))
}

#[utoipa::path(post, path = "/api/user-accounts/{id}/ban", tag = "user-accounts", params(("id" = String, Path, description = "Account id")), request_body = crate::openapi::BanRequestDoc, responses((status = 200, description = "Banned"), (status = 404, description = "Not Found")))]
pub async fn ban(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<BanRequest>,
) -> Result<Json<user_account::Model>, JsonApiError> {
    let banned = accounts::ban_user_account(&state.db, &id, &body.reason_for_ban).await?;
    info!(user_account_id = %banned.id, count_bans = banned.count_bans, "account banned via api");
    Ok(Json(banned))
}

#[utoipa::path(get, path = "/api/user-accounts/{id}/bans", tag = "user-accounts", params(("id" = String, Path, description = "Account id"), PageQuery), responses((status = 200, description = "Ban history"), (status = 404, description = "Not Found")))]
pub async fn bans(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Paginated<banned_account::Model>>, JsonApiError> {
    Ok(Json(accounts::read_banned_accounts(&state.db, &id, q.pagination(state.page_size)).await?))
}
