use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use common::pagination::Paginated;
use models::user_role;
use service::user_role_service::{
    self as roles, CreateUserRoleInput, RoleDetails, UpdateUserRoleInput, UserRoleFilter,
};

use super::auth::ServerState;
use super::PageQuery;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleListQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub keyword: Option<String>,
    pub role_name: Option<String>,
    pub is_super_admin: Option<bool>,
}

#[utoipa::path(post, path = "/api/user-roles", tag = "user-roles", request_body = crate::openapi::CreateUserRoleDoc, responses((status = 200, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateUserRoleInput>,
) -> Result<Json<RoleDetails>, JsonApiError> {
    let created = roles::create_user_role(&state.db, input).await?;
    info!(role_id = created.role.id, "role created via api");
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/user-roles", tag = "user-roles", params(RoleListQuery), responses((status = 200, description = "Page of roles")))]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<RoleListQuery>,
) -> Result<Json<Paginated<RoleDetails>>, JsonApiError> {
    let page = PageQuery { page_number: q.page_number, page_size: q.page_size }.pagination(state.page_size);
    let filter = UserRoleFilter { role_name: q.role_name, is_super_admin: q.is_super_admin, keyword: q.keyword };
    Ok(Json(roles::read_user_roles(&state.db, page, filter).await?))
}

#[utoipa::path(put, path = "/api/user-roles", tag = "user-roles", request_body = crate::openapi::UpdateUserRoleDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<UpdateUserRoleInput>,
) -> Result<Json<RoleDetails>, JsonApiError> {
    Ok(Json(roles::update_user_role(&state.db, input).await?))
}

#[utoipa::path(get, path = "/api/user-roles/{id}", tag = "user-roles", params(("id" = i32, Path, description = "Role id")), responses((status = 200, description = "Role"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<RoleDetails>, JsonApiError> {
    Ok(Json(roles::read_user_role_by_id(&state.db, id).await?))
}

#[utoipa::path(delete, path = "/api/user-roles/{id}", tag = "user-roles", params(("id" = i32, Path, description = "Role id")), responses((status = 200, description = "Deleted role"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<user_role::Model>, JsonApiError> {
    let removed = roles::delete_user_role(&state.db, id).await?;
    info!(role_id = removed.id, "role deleted via api");
    Ok(Json(removed))
}
