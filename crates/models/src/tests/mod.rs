mod crud_tests;
mod transaction_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with every migration applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    // A second pooled connection would open a different in-memory database
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
