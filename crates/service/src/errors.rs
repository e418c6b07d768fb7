use thiserror::Error;

/// Outcome sentinels for catalog and storage operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn storage(err: impl std::fmt::Display) -> Self { Self::Storage(err.to_string()) }
}
