#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::user_account_service::CreateUserAccountInput;

/// Fresh migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // One connection only: each sqlite memory connection is its own database
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn account_input(username: &str, user_role_id: Option<i32>) -> CreateUserAccountInput {
    CreateUserAccountInput {
        username: username.to_string(),
        email: format!("{username}@home.test"),
        first_name: "Test".into(),
        middle_name: String::new(),
        last_name: "Member".into(),
        gender: "unspecified".into(),
        phone_number: "09175550101".into(),
        password: "Passw0rd!".into(),
        user_role_id,
    }
}
