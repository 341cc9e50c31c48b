use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn get_credentials(&self, user_id: &str) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>,  // key: id
        creds: Mutex<HashMap<String, Credentials>>, // key: user_id
    }

    impl MockAuthRepository {
        /// Store a user with an already hashed password.
        pub fn insert(&self, user: AuthUser, password_hash: String) {
            self.creds
                .lock()
                .unwrap()
                .insert(user.id.clone(), Credentials { user_id: user.id.clone(), password_hash });
            self.users.lock().unwrap().insert(user.id.clone(), user);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.username == username).cloned())
        }

        async fn find_user_by_id(&self, id: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(id).cloned())
        }

        async fn get_credentials(&self, user_id: &str) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(user_id).cloned())
        }
    }
}
