use sea_orm::{DatabaseConnection, EntityTrait};

use models::user_account;
use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_auth_user(a: &user_account::Model) -> AuthUser {
    AuthUser { id: a.id.clone(), username: a.username.clone(), status: a.status }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = user_account::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.as_ref().map(to_auth_user))
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = user_account::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.as_ref().map(to_auth_user))
    }

    async fn get_credentials(&self, user_id: &str) -> Result<Option<Credentials>, AuthError> {
        let res = user_account::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|a| Credentials { user_id: a.id, password_hash: a.password_hash }))
    }
}
