use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user_account;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub action_id: i32,
    pub is_cleared: bool,
    pub user_account_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { UserAccount }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::UserAccount => Entity::belongs_to(user_account::Entity)
                .from(Column::UserAccountId)
                .to(user_account::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub action_id: i32,
    pub user_account_id: String,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewNotification) -> Result<Model, errors::ModelError> {
    user_account::validate_required("title", &new.title)?;
    user_account::validate_required("message", &new.message)?;
    user_account::validate_required("type", &new.notification_type)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(new.title),
        message: Set(new.message),
        notification_type: Set(new.notification_type),
        action_id: Set(new.action_id),
        is_cleared: Set(false),
        user_account_id: Set(new.user_account_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
