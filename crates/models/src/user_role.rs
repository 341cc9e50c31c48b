use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::permissions;

pub const ROLE_NAME_MAX: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub role_name: String,
    pub is_super_admin: bool,
    pub permissions_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Permissions,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Permissions => Entity::belongs_to(permissions::Entity)
                .from(Column::PermissionsId)
                .to(permissions::Column::Id)
                .into(),
        }
    }
}

impl Related<permissions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Permissions.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_role_name(name: &str) -> Result<(), errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("role_name required".into()));
    }
    if trimmed.chars().count() > ROLE_NAME_MAX {
        return Err(errors::ModelError::Validation(format!("role_name longer than {ROLE_NAME_MAX} characters")));
    }
    Ok(())
}

/// Insert a role pointing at an existing permissions row.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    role_name: &str,
    is_super_admin: bool,
    permissions_id: i32,
) -> Result<Model, errors::ModelError> {
    validate_role_name(role_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        role_name: Set(role_name.trim().to_string()),
        is_super_admin: Set(is_super_admin),
        permissions_id: Set(permissions_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
