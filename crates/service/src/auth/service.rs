use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::domain::{LoginInput, RegisterInput, User};
use super::errors::AuthError;
use super::repository::AccountRepository;
use super::session::SessionStore;
use crate::ids;

/// Auth service configuration: the single administrator identity.
#[derive(Clone)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: String,
}

/// Auth business service independent of web framework
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionStore>,
    cfg: AuthConfig,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountRepository>, sessions: Arc<dyn SessionStore>, cfg: AuthConfig) -> Self {
        Self { accounts, sessions, cfg }
    }

    pub fn admin_username(&self) -> &str {
        &self.cfg.admin_username
    }

    /// Exact comparison against the configured admin identity.
    pub fn check_admin_credentials(&self, username: &str, password: &str) -> bool {
        username == self.cfg.admin_username && password == self.cfg.admin_password
    }

    /// Verify admin credentials and open a session.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAccountRepository};
    /// use service::auth::{domain::LoginInput, session::InMemorySessionStore};
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { admin_username: "alaa".into(), admin_password: "0000".into() };
    /// let svc = AuthService::new(Arc::new(MockAccountRepository::default()), Arc::new(InMemorySessionStore::new()), cfg);
    /// let input = LoginInput { username: Some("alaa".into()), password: Some("0000".into()) };
    /// let token = tokio_test::block_on(svc.admin_login(input)).unwrap();
    /// assert!(tokio_test::block_on(svc.is_admin_session(Some(&token))));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn admin_login(&self, input: LoginInput) -> Result<String, AuthError> {
        let username = input.username.as_deref().unwrap_or_default();
        let password = input.password.as_deref().unwrap_or_default();
        if !self.check_admin_credentials(username, password) {
            warn!("admin_login_rejected");
            return Err(AuthError::InvalidAdminCredentials);
        }
        let token = self.sessions.create().await;
        info!("admin_login");
        Ok(token)
    }

    /// End the admin session carried by `token`, if any.
    pub async fn admin_logout(&self, token: Option<&str>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.sessions.revoke(token).await;
            info!("admin_logout");
        }
    }

    /// Whether `token` names an active admin session. Missing tokens never do.
    pub async fn is_admin_session(&self, token: Option<&str>) -> bool {
        match token {
            Some(t) => self.sessions.is_valid(t).await,
            None => false,
        }
    }

    /// Authorization gate for admin-only operations.
    pub async fn require_admin(&self, token: Option<&str>) -> Result<(), AuthError> {
        if self.is_admin_session(token).await {
            Ok(())
        } else {
            Err(AuthError::SessionRequired)
        }
    }

    /// Register a visitor account.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAccountRepository};
    /// use service::auth::{domain::RegisterInput, session::InMemorySessionStore};
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { admin_username: "alaa".into(), admin_password: "0000".into() };
    /// let svc = AuthService::new(Arc::new(MockAccountRepository::default()), Arc::new(InMemorySessionStore::new()), cfg);
    /// let input = RegisterInput { username: Some(" bob ".into()), password: Some("x".into()), full_name: None };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "bob");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        let (Some(username), Some(password)) = (non_empty(&input.username), non_empty(&input.password)) else {
            return Err(AuthError::Validation("Username and password are required".into()));
        };
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username cannot be empty".into()));
        }
        if username.to_lowercase() == self.cfg.admin_username.to_lowercase() {
            return Err(AuthError::Reserved);
        }
        if let Some(existing) = self.accounts.find_by_username(username).await? {
            debug!(existing = %existing.username, "username taken");
            return Err(AuthError::Conflict);
        }

        let user = User {
            id: ids::user_id(),
            username: username.to_string(),
            password: password.to_string(),
            full_name: input.full_name.as_deref().map(str::trim).unwrap_or_default().to_string(),
            created_at: Utc::now(),
        };
        let user = self.accounts.insert_unique(user).await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Authenticate a visitor. The admin must use [`AuthService::admin_login`].
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginInput) -> Result<User, AuthError> {
        let (Some(username), Some(password)) = (non_empty(&input.username), non_empty(&input.password)) else {
            return Err(AuthError::Validation("Username and password are required".into()));
        };
        if username == self.cfg.admin_username {
            return Err(AuthError::AdminAccount);
        }
        let user = self
            .accounts
            .list()
            .await?
            .into_iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        info!(user_id = %user.id, username = %user.username, "user_login");
        Ok(user)
    }
}
