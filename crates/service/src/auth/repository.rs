use async_trait::async_trait;

use super::domain::User;
use super::errors::AuthError;

/// Repository abstraction for visitor accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All accounts in stored order.
    async fn list(&self) -> Result<Vec<User>, AuthError>;

    /// Account whose username equals `username` ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(self.list().await?.into_iter().find(|u| u.username_matches(username)))
    }

    /// Append `user` unless its username is already taken (ignoring case),
    /// in which case [`AuthError::Conflict`] is returned and nothing changes.
    async fn insert_unique(&self, user: User) -> Result<User, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        users: Mutex<Vec<User>>,
    }

    fn poisoned<T>(_: T) -> AuthError {
        AuthError::Repository("mock repository lock poisoned".into())
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn list(&self) -> Result<Vec<User>, AuthError> {
            Ok(self.users.lock().map_err(poisoned)?.clone())
        }

        async fn insert_unique(&self, user: User) -> Result<User, AuthError> {
            let mut users = self.users.lock().map_err(poisoned)?;
            if users.iter().any(|u| u.username_matches(&user.username)) {
                return Err(AuthError::Conflict);
            }
            users.push(user.clone());
            Ok(user)
        }
    }
}
