pub mod auth;
pub mod user_accounts;
pub mod user_roles;
pub mod notifications;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::{IntoParams, OpenApi};

use common::pagination::Pagination;
use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `page_number` (1-based) and optional `page_size` query parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self, default_size: u32) -> Pagination {
        Pagination::new(self.page_number.unwrap_or(1), self.page_size.unwrap_or(default_size))
    }
}

/// Build the full application router: public routes plus `/api/*` guarded by account checks
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/auth/login", post(auth::login));

    let api = Router::new()
        .route(
            "/api/user-accounts",
            post(user_accounts::create).get(user_accounts::list).put(user_accounts::update),
        )
        .route("/api/user-accounts/:id", get(user_accounts::get).delete(user_accounts::delete))
        .route("/api/user-accounts/:id/activate", put(user_accounts::activate))
        .route("/api/user-accounts/:id/deactivate", put(user_accounts::deactivate))
        .route("/api/user-accounts/:id/ban", post(user_accounts::ban))
        .route("/api/user-accounts/:id/bans", get(user_accounts::bans))
        .route(
            "/api/user-roles",
            post(user_roles::create).get(user_roles::list).put(user_roles::update),
        )
        .route("/api/user-roles/:id", get(user_roles::get).delete(user_roles::delete))
        .route("/api/notifications", post(notifications::generate).get(notifications::read))
        .route("/api/notifications/clear", put(notifications::clear))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_active_account));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // Status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::PageQuery;

    #[test]
    fn page_query_defaults() {
        let p = PageQuery::default().pagination(10);
        assert_eq!((p.page, p.per_page), (1, 10));
        let p = PageQuery { page_number: Some(3), page_size: Some(5) }.pagination(10);
        assert_eq!(p.normalize(), (2, 5));
    }
}
