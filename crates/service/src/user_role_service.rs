use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use common::pagination::{Paginated, Pagination};
use models::{permissions, user_role};
use crate::filters::contains_literal;
use crate::{errors::ServiceError, validators};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRoleInput {
    pub role_name: String,
    #[serde(default)]
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRoleInput {
    pub id: i32,
    pub role_name: String,
    #[serde(default)]
    pub is_super_admin: bool,
}

/// Optional predicates for listing roles; unset fields do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRoleFilter {
    pub role_name: Option<String>,
    pub is_super_admin: Option<bool>,
    pub keyword: Option<String>,
}

/// Role together with its permissions row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoleDetails {
    #[serde(flatten)]
    pub role: user_role::Model,
    pub permissions: Option<permissions::Model>,
}

impl From<(user_role::Model, Option<permissions::Model>)> for RoleDetails {
    fn from((role, permissions): (user_role::Model, Option<permissions::Model>)) -> Self {
        Self { role, permissions }
    }
}

/// Create a role and its permissions row in one transaction.
#[instrument(skip(db, input), fields(role_name = %input.role_name))]
pub async fn create_user_role(db: &DatabaseConnection, input: CreateUserRoleInput) -> Result<RoleDetails, ServiceError> {
    validators::validate_user_role(&input.role_name)?;
    let txn = db.begin().await?;
    let perms = permissions::create(&txn).await?;
    let role = user_role::create(&txn, &input.role_name, input.is_super_admin, perms.id).await?;
    txn.commit().await?;
    info!(role_id = role.id, permissions_id = perms.id, "user_role_created");
    Ok(RoleDetails { role, permissions: Some(perms) })
}

pub async fn read_user_role_by_id(db: &DatabaseConnection, id: i32) -> Result<RoleDetails, ServiceError> {
    user_role::Entity::find_by_id(id)
        .find_also_related(permissions::Entity)
        .one(db)
        .await?
        .map(RoleDetails::from)
        .ok_or_else(|| ServiceError::not_found("user role"))
}

/// List roles newest first.
pub async fn read_user_roles(
    db: &DatabaseConnection,
    opts: Pagination,
    filter: UserRoleFilter,
) -> Result<Paginated<RoleDetails>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = user_role::Entity::find();
    if let Some(name) = filter.role_name.filter(|n| !n.is_empty()) {
        query = query.filter(user_role::Column::RoleName.eq(name));
    }
    if let Some(flag) = filter.is_super_admin {
        query = query.filter(user_role::Column::IsSuperAdmin.eq(flag));
    }
    if let Some(keyword) = filter.keyword.filter(|k| !k.is_empty()) {
        query = query.filter(contains_literal(user_role::Column::RoleName, &keyword));
    }
    let paginator = query
        .order_by_desc(user_role::Column::CreatedAt)
        .order_by_desc(user_role::Column::Id)
        .find_also_related(permissions::Entity)
        .paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page_idx).await?;
    Ok(Paginated::new(
        rows.into_iter().map(RoleDetails::from).collect(),
        totals.number_of_items,
        totals.number_of_pages,
    ))
}

/// Overwrite name and super-admin flag.
#[instrument(skip(db, input), fields(role_id = input.id))]
pub async fn update_user_role(db: &DatabaseConnection, input: UpdateUserRoleInput) -> Result<RoleDetails, ServiceError> {
    validators::validate_user_role(&input.role_name)?;
    let mut am: user_role::ActiveModel = user_role::Entity::find_by_id(input.id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user role"))?
        .into();
    am.role_name = Set(input.role_name.trim().to_string());
    am.is_super_admin = Set(input.is_super_admin);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(role_id = updated.id, "user_role_updated");
    read_user_role_by_id(db, updated.id).await
}

/// Remove a role and its permissions row. Accounts holding the role lose it.
#[instrument(skip(db))]
pub async fn delete_user_role(db: &DatabaseConnection, id: i32) -> Result<user_role::Model, ServiceError> {
    let txn = db.begin().await?;
    let role = user_role::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("user role"))?;
    user_role::Entity::delete_by_id(role.id).exec(&txn).await?;
    permissions::Entity::delete_by_id(role.permissions_id).exec(&txn).await?;
    txn.commit().await?;
    info!(role_id = role.id, "user_role_deleted");
    Ok(role)
}
