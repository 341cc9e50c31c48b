use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user_role;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 32;

/// Account status. Transitions are plain assignments; any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "deleted")]
    Deleted,
    #[sea_orm(string_value = "banned")]
    Banned,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Deleted => "deleted",
            UserStatus::Banned => "banned",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub status: UserStatus,
    pub count_bans: i32,
    pub user_role_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    UserRole,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::UserRole => Entity::belongs_to(user_role::Entity).from(Column::UserRoleId).to(user_role::Column::Id).into() }
    }
}

impl Related<user_role::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserRole.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a new account; `password_hash` is already hashed.
#[derive(Clone, Debug)]
pub struct NewUserAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub password_hash: String,
    pub user_role_id: Option<i32>,
}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(errors::ModelError::Validation(format!("username must be {USERNAME_MIN}-{USERNAME_MAX} characters")));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return Err(errors::ModelError::Validation("username may only contain letters, digits, '_' and '.'".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(errors::ModelError::Validation("invalid email".into()));
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// Required free-text field such as a first name.
pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub fn validate_phone_number(phone: &str) -> Result<(), errors::ModelError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !allowed || !(7..=15).contains(&digits) {
        return Err(errors::ModelError::Validation("invalid phone_number".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUserAccount) -> Result<Model, errors::ModelError> {
    validate_username(&new.username)?;
    validate_email(&new.email)?;
    if new.password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(new.username),
        email: Set(new.email),
        first_name: Set(new.first_name),
        middle_name: Set(new.middle_name),
        last_name: Set(new.last_name),
        gender: Set(new.gender),
        phone_number: Set(new.phone_number),
        password_hash: Set(new.password_hash),
        status: Set(UserStatus::Active),
        count_bans: Set(0),
        user_role_id: Set(new.user_role_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

/// Assign `status` and refresh `updated_at`.
pub async fn set_status<C: ConnectionTrait>(db: &C, id: &str, status: UserStatus) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound("user account not found".into()))?
        .into();
    found.status = Set(status);
    found.updated_at = Set(Utc::now().into());
    Ok(found.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("mom_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(USERNAME_MAX + 1)).is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("dad@home.net").is_ok());
        assert!(validate_email("dad.home.net").is_err());
        assert!(validate_email("@home.net").is_err());
        assert!(validate_email("dad@home").is_err());
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone_number("+63 917-555-0101").is_ok());
        assert!(validate_phone_number("12ab567").is_err());
        assert!(validate_phone_number("123").is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let v = serde_json::to_value(UserStatus::Banned).unwrap();
        assert_eq!(v, serde_json::json!("banned"));
        assert_eq!(UserStatus::Inactive.to_string(), "inactive");
    }
}
