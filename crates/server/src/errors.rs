use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// JSON error body `{"error": "<message>"}` with a status code.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Storage(_) => JsonApiError::internal(e),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::Validation(_) | AuthError::Reserved => StatusCode::BAD_REQUEST,
            AuthError::InvalidAdminCredentials | AuthError::InvalidCredentials | AuthError::SessionRequired => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AdminAccount => StatusCode::FORBIDDEN,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::Repository(_) => return JsonApiError::internal(e),
        };
        debug!(code = e.code(), status = status.as_u16(), error = %e, "auth request rejected");
        JsonApiError::new(status, e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
