//! Startup seeding: the default super-admin role and an optional bootstrap admin.

use configs::SeedConfig;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{info, instrument};

use models::{user_account, user_role};
use crate::errors::ServiceError;
use crate::user_account_service::{create_user_account, CreateUserAccountInput};
use crate::user_role_service::{create_user_role, CreateUserRoleInput};

pub const SUPER_ADMIN_ROLE: &str = "Super Admin";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub role_created: bool,
    pub admin_created: bool,
}

/// Idempotent; safe to run on every start.
#[instrument(skip(db, cfg))]
pub async fn seed_defaults(db: &DatabaseConnection, cfg: &SeedConfig) -> Result<SeedOutcome, ServiceError> {
    let mut outcome = SeedOutcome::default();

    let existing = user_role::Entity::find()
        .filter(user_role::Column::RoleName.eq(SUPER_ADMIN_ROLE))
        .one(db)
        .await?;
    let role_id = match existing {
        Some(role) => role.id,
        None => {
            let created = create_user_role(
                db,
                CreateUserRoleInput { role_name: SUPER_ADMIN_ROLE.to_string(), is_super_admin: true },
            )
            .await?;
            outcome.role_created = true;
            created.role.id
        }
    };

    let (Some(username), Some(password)) = (cfg.admin_username.as_deref(), cfg.admin_password.as_deref()) else {
        return Ok(outcome);
    };
    if user_account::find_by_username(db, username).await?.is_some() {
        return Ok(outcome);
    }
    let email = cfg.admin_email.clone().unwrap_or_else(|| format!("{username}@homemgmt.local"));
    let admin = create_user_account(
        db,
        CreateUserAccountInput {
            username: username.to_string(),
            email,
            first_name: "System".into(),
            middle_name: String::new(),
            last_name: "Administrator".into(),
            gender: "unspecified".into(),
            phone_number: "0000000000".into(),
            password: password.to_string(),
            user_role_id: Some(role_id),
        },
    )
    .await?;
    outcome.admin_created = true;
    info!(user_account_id = %admin.account.id, username = %admin.account.username, "seeded admin account");
    Ok(outcome)
}
