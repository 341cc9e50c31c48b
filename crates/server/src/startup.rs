use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Assemble state and router for an already prepared database.
pub fn build_app(db: DatabaseConnection, cfg: &AppConfig) -> Router {
    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            token_ttl_hours: cfg.auth.token_ttl_hours,
        },
        page_size: cfg.pagination.page_size,
    };
    routes::build_router(state, build_cors())
}

/// Connect, migrate and seed, then serve `cfg` until the listener fails.
/// Logging and configuration are set up by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await.map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }

    let seeded = service::seeder::seed_defaults(&db, &cfg.seed).await.map_err(|e| StartupError::Database(e.to_string()))?;
    info!(role_created = seeded.role_created, admin_created = seeded.admin_created, "seed complete");

    let app = build_app(db, &cfg);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
