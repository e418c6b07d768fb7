use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::JsonApiError;

/// JSON request body with storefront semantics.
///
/// A request without a JSON content type or with an empty body reads as
/// `T::default()`, like an empty object. Malformed JSON is a 400 with the
/// usual `{"error": ..}` body instead of axum's plain-text rejection.
pub struct JsonBody<T>(pub T);

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::new(e.status(), e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }
        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            debug!(error = %e, "rejected request body");
            JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON body")
        })
    }
}
