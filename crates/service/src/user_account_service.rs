use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use common::pagination::{Paginated, Pagination};
use models::user_account::{self, NewUserAccount, UserStatus};
use models::{banned_account, permissions, user_role};
use crate::auth::service::hash_password;
use crate::user_role_service::RoleDetails;
use crate::filters::contains_literal;
use crate::{errors::ServiceError, validators};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserAccountInput {
    pub username: String,
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub password: String,
    #[serde(default)]
    pub user_role_id: Option<i32>,
}

/// Full replacement of an account's profile, username and role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserAccountInput {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    #[serde(default)]
    pub user_role_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserAccountFilter {
    pub status: Option<UserStatus>,
    pub user_role_id: Option<i32>,
    pub role_name: Option<String>,
    /// Substring of username or email
    pub keyword: Option<String>,
}

/// Account with its role and the role's permissions.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountDetails {
    #[serde(flatten)]
    pub account: user_account::Model,
    pub user_role: Option<RoleDetails>,
}

/// Fails with `Conflict` when the username is already used.
pub async fn check_username_taken(db: &DatabaseConnection, username: &str) -> Result<(), ServiceError> {
    if user_account::find_by_username(db, username).await?.is_some() {
        return Err(ServiceError::Conflict("username already exists".into()));
    }
    Ok(())
}

async fn ensure_role_exists(db: &DatabaseConnection, role_id: Option<i32>) -> Result<(), ServiceError> {
    if let Some(id) = role_id {
        if user_role::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("user role"));
        }
    }
    Ok(())
}

async fn find_account(db: &DatabaseConnection, id: &str) -> Result<user_account::Model, ServiceError> {
    user_account::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user account"))
}

/// Create an account with status `active` and a hashed password.
#[instrument(skip(db, input), fields(username = %input.username))]
pub async fn create_user_account(db: &DatabaseConnection, input: CreateUserAccountInput) -> Result<AccountDetails, ServiceError> {
    validators::validate_create_user_account(&input)?;
    check_username_taken(db, &input.username).await?;
    ensure_role_exists(db, input.user_role_id).await?;

    let password_hash = hash_password(&input.password).map_err(|e| ServiceError::Hash(e.to_string()))?;
    let created = user_account::create(
        db,
        NewUserAccount {
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            middle_name: input.middle_name,
            last_name: input.last_name,
            gender: input.gender,
            phone_number: input.phone_number,
            password_hash,
            user_role_id: input.user_role_id,
        },
    )
    .await?;
    info!(user_account_id = %created.id, username = %created.username, "user_account_created");
    read_user_account_by_id(db, &created.id).await
}

pub async fn read_user_account_by_id(db: &DatabaseConnection, id: &str) -> Result<AccountDetails, ServiceError> {
    let (account, role) = user_account::Entity::find_by_id(id.to_string())
        .find_also_related(user_role::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user account"))?;
    let user_role = match role {
        Some(role) => {
            let perms = permissions::Entity::find_by_id(role.permissions_id).one(db).await?;
            Some(RoleDetails { role, permissions: perms })
        }
        None => None,
    };
    Ok(AccountDetails { account, user_role })
}

/// List accounts newest first.
pub async fn read_user_accounts(
    db: &DatabaseConnection,
    opts: Pagination,
    filter: UserAccountFilter,
) -> Result<Paginated<AccountDetails>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = user_account::Entity::find();
    if let Some(status) = filter.status {
        query = query.filter(user_account::Column::Status.eq(status));
    }
    if let Some(role_id) = filter.user_role_id {
        query = query.filter(user_account::Column::UserRoleId.eq(role_id));
    }
    if let Some(keyword) = filter.keyword.filter(|k| !k.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(contains_literal(user_account::Column::Username, &keyword))
                .add(contains_literal(user_account::Column::Email, &keyword)),
        );
    }
    let mut joined = query
        .order_by_desc(user_account::Column::CreatedAt)
        .find_also_related(user_role::Entity);
    if let Some(name) = filter.role_name.filter(|n| !n.is_empty()) {
        joined = joined.filter(user_role::Column::RoleName.eq(name));
    }

    let paginator = joined.paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page_idx).await?;

    let perm_ids: Vec<i32> = rows.iter().filter_map(|(_, r)| r.as_ref().map(|r| r.permissions_id)).collect();
    let perms: HashMap<i32, permissions::Model> = if perm_ids.is_empty() {
        HashMap::new()
    } else {
        permissions::Entity::find()
            .filter(permissions::Column::Id.is_in(perm_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };

    let data = rows
        .into_iter()
        .map(|(account, role)| AccountDetails {
            account,
            user_role: role.map(|role| RoleDetails { permissions: perms.get(&role.permissions_id).cloned(), role }),
        })
        .collect();
    Ok(Paginated::new(data, totals.number_of_items, totals.number_of_pages))
}

/// Overwrite every editable field of an account.
#[instrument(skip(db, input), fields(user_account_id = %input.id))]
pub async fn update_user_account(db: &DatabaseConnection, input: UpdateUserAccountInput) -> Result<AccountDetails, ServiceError> {
    validators::validate_update_user_account(&input)?;
    let existing = find_account(db, &input.id).await?;
    if existing.username != input.username {
        check_username_taken(db, &input.username).await?;
    }
    ensure_role_exists(db, input.user_role_id).await?;

    let mut am: user_account::ActiveModel = existing.into();
    am.username = Set(input.username);
    am.email = Set(input.email);
    am.first_name = Set(input.first_name);
    am.middle_name = Set(input.middle_name);
    am.last_name = Set(input.last_name);
    am.gender = Set(input.gender);
    am.phone_number = Set(input.phone_number);
    am.user_role_id = Set(input.user_role_id);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(user_account_id = %updated.id, "user_account_updated");
    read_user_account_by_id(db, &updated.id).await
}

async fn change_status(db: &DatabaseConnection, id: &str, status: UserStatus) -> Result<user_account::Model, ServiceError> {
    let updated = user_account::set_status(db, id, status).await?;
    info!(user_account_id = %updated.id, status = %status, "user_account_status_changed");
    Ok(updated)
}

/// Soft delete: the row stays with status `deleted`.
#[instrument(skip(db))]
pub async fn delete_user_account(db: &DatabaseConnection, id: &str) -> Result<user_account::Model, ServiceError> {
    change_status(db, id, UserStatus::Deleted).await
}

#[instrument(skip(db))]
pub async fn activate_user_account(db: &DatabaseConnection, id: &str) -> Result<user_account::Model, ServiceError> {
    change_status(db, id, UserStatus::Active).await
}

#[instrument(skip(db))]
pub async fn deactivate_user_account(db: &DatabaseConnection, id: &str) -> Result<user_account::Model, ServiceError> {
    change_status(db, id, UserStatus::Inactive).await
}

/// Record a ban, bump `count_bans` and mark the account banned, all in one transaction.
#[instrument(skip(db, reason))]
pub async fn ban_user_account(db: &DatabaseConnection, id: &str, reason: &str) -> Result<user_account::Model, ServiceError> {
    validators::validate_ban(reason)?;
    find_account(db, id).await?;
    let txn = db.begin().await?;
    let ban = banned_account::create(&txn, id, reason).await?;
    user_account::Entity::update_many()
        .col_expr(user_account::Column::CountBans, Expr::col(user_account::Column::CountBans).add(1))
        .col_expr(user_account::Column::Status, Expr::value(UserStatus::Banned))
        .col_expr(user_account::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(user_account::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    let account = find_account(db, id).await?;
    info!(user_account_id = %account.id, ban_id = ban.id, count_bans = account.count_bans, "user_account_banned");
    Ok(account)
}

/// Ban history of one account, newest first.
pub async fn read_banned_accounts(
    db: &DatabaseConnection,
    user_account_id: &str,
    opts: Pagination,
) -> Result<Paginated<banned_account::Model>, ServiceError> {
    find_account(db, user_account_id).await?;
    let (page_idx, per_page) = opts.normalize();
    let paginator = banned_account::Entity::find()
        .filter(banned_account::Column::UserAccountId.eq(user_account_id))
        .order_by_desc(banned_account::Column::CreatedAt)
        .order_by_desc(banned_account::Column::Id)
        .paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page_idx).await?;
    Ok(Paginated::new(rows, totals.number_of_items, totals.number_of_pages))
}
