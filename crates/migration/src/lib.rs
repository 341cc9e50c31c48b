//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_permissions;
mod m20240901_000002_create_user_role;
mod m20240901_000003_create_user_account;
mod m20240901_000004_create_banned_account;
mod m20240901_000005_create_notification;
mod m20240901_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_permissions::Migration),
            Box::new(m20240901_000002_create_user_role::Migration),
            Box::new(m20240901_000003_create_user_account::Migration),
            Box::new(m20240901_000004_create_banned_account::Migration),
            Box::new(m20240901_000005_create_notification::Migration),
            // Indexes should always be applied last
            Box::new(m20240901_000006_add_indexes::Migration),
        ]
    }
}
