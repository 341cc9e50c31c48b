use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use models::user_account::UserStatus;
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl_hours: c.token_ttl_hours }
    }
}

/// Hash a password into an argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Authenticate by username and password and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig, hash_password}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{AuthUser, LoginInput};
    /// use models::user_account::UserStatus;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let user = AuthUser { id: "u1".into(), username: "mom".into(), status: UserStatus::Active };
    /// repo.insert(user, hash_password("Passw0rd").unwrap());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "mom".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.id, "u1");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("username and password required".into()));
        }
        let user = self.repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if matches!(user.status, UserStatus::Deleted | UserStatus::Banned) {
            debug!(user_id = %user.id, status = %user.status, "login refused for status");
            return Err(AuthError::Unauthorized);
        }

        let cred = self.repo
            .get_credentials(&user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if !verify_password(&input.password, &cred.password_hash)? {
            return Err(AuthError::Unauthorized);
        }

        let expires_at = chrono::Duration::try_hours(self.cfg.token_ttl_hours)
            .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenError("token ttl out of range".into()))?
            .timestamp();
        let claims = Claims { sub: user.id.clone(), usr: user.username.clone(), exp: expires_at as usize };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token, expires_at })
    }

    /// Decode and check an HS256 token.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::Unauthorized
            })
    }

    /// Resolve a bearer token to its account; only `active` accounts pass.
    pub async fn authorize(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.decode_token(token)?;
        let user = self.repo
            .find_user_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if user.status != UserStatus::Active {
            return Err(AuthError::Forbidden);
        }
        Ok(user)
    }
}
