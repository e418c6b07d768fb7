use std::sync::Arc;

use crate::auth::domain::User;
use crate::auth::errors::AuthError;
use crate::auth::repository::AccountRepository;
use crate::errors::ServiceError;
use crate::storage::JsonListStore;

pub const USERS_CONTAINER: &str = "users";

/// File-backed visitor accounts, persisted as a JSON array in registration order.
pub struct UserStore {
    store: JsonListStore<User>,
}

impl UserStore {
    /// Open the account file at `path`. A missing or corrupt file reads as no accounts.
    pub fn new<P: Into<std::path::PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(USERS_CONTAINER, path, Vec::new()) })
    }

    pub async fn load(&self) -> Vec<User> {
        self.store.load().await
    }

    pub async fn save(&self, users: &[User]) -> Result<(), ServiceError> {
        self.store.save(users).await
    }
}

#[async_trait::async_trait]
impl AccountRepository for UserStore {
    async fn list(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.load().await)
    }

    async fn insert_unique(&self, user: User) -> Result<User, AuthError> {
        // Conflict is decided inside the container lock so two registrations
        // racing on the same name cannot both land.
        let outcome = self
            .store
            .update(|users| {
                if users.iter().any(|u| u.username_matches(&user.username)) {
                    return Ok(None);
                }
                users.push(user.clone());
                Ok(Some(user.clone()))
            })
            .await?;
        outcome.ok_or(AuthError::Conflict)
    }
}
