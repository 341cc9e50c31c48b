use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use service::auth::domain::LoginInput;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    /// Default `page_size` when a list request omits it
    pub page_size: u32,
}

impl ServerState {
    pub fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository::new(self.db.clone()));
        AuthService::new(
            repo,
            AuthConfig { jwt_secret: self.auth.jwt_secret.clone(), token_ttl_hours: self.auth.token_ttl_hours },
        )
    }
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_account_id: String,
    pub username: String,
    pub token: String,
    pub expires_at: i64,
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in", body = crate::openapi::LoginResponse), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<LoginOutput>, JsonApiError> {
    let session = state.auth_service().login(input).await?;
    Ok(Json(LoginOutput {
        user_account_id: session.user.id,
        username: session.user.username,
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// Guard for `/api/*`: requires `Authorization: Bearer <token>` of an `active` account.
/// Missing or invalid tokens give 401, any other account status gives 403.
/// The resolved `AuthUser` is stored in request extensions.
pub async fn require_active_account(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let token = match req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized("expected Bearer token"));
            }
        },
        None => {
            tracing::warn!(path = %path, "missing Authorization header");
            return Err(JsonApiError::unauthorized("missing bearer token"));
        }
    };

    let user = state.auth_service().authorize(&token).await.map_err(|e| {
        tracing::warn!(path = %path, error = %e, "request rejected");
        JsonApiError::from(e)
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
