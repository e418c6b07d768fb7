use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("This username is reserved for the admin")]
    Reserved,
    #[error("This username is already taken")]
    Conflict,
    #[error("Invalid credentials")]
    InvalidAdminCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Use the admin dashboard to sign in as admin")]
    AdminAccount,
    #[error("Admin authentication required")]
    SessionRequired,
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::Reserved => 1003,
            AuthError::InvalidAdminCredentials => 1004,
            AuthError::InvalidCredentials => 1005,
            AuthError::AdminAccount => 1006,
            AuthError::SessionRequired => 1007,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<crate::errors::ServiceError> for AuthError {
    fn from(e: crate::errors::ServiceError) -> Self {
        AuthError::Repository(e.to_string())
    }
}
