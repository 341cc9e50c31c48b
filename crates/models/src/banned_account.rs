use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user_account;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banned_account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub reason_for_ban: String,
    pub user_account_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { UserAccount }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::UserAccount => Entity::belongs_to(user_account::Entity).from(Column::UserAccountId).to(user_account::Column::Id).into() }
    }
}

impl Related<user_account::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserAccount.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_reason(reason: &str) -> Result<(), errors::ModelError> {
    if reason.trim().is_empty() {
        return Err(errors::ModelError::Validation("reason_for_ban required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, user_account_id: &str, reason: &str) -> Result<Model, errors::ModelError> {
    validate_reason(reason)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        reason_for_ban: Set(reason.trim().to_string()),
        user_account_id: Set(user_account_id.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
