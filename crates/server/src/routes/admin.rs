use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use service::catalog::{Product, ProductInput};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::auth::{self, ServerState};

#[derive(Serialize)]
pub struct DeleteOutput {
    pub ok: bool,
    pub removed: Product,
}

/// Middleware: reject catalog writes unless the `admin_token` cookie names an active session.
/// Runs before the handler, so a rejected request never touches the store.
pub async fn require_admin(
    State(state): State<ServerState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = auth::admin_token(&jar);
    if let Err(e) = state.auth.require_admin(token.as_deref()).await {
        tracing::warn!(method = %req.method(), path = %req.uri().path(), "admin session required");
        return Err(e.into());
    }
    Ok(next.run(req).await)
}

#[utoipa::path(post, path = "/api/products", tag = "admin", request_body = crate::openapi::ProductInputDoc, responses((status = 201, description = "Created", body = crate::openapi::ProductDoc), (status = 400, description = "Bad Request"), (status = 401, description = "Admin authentication required")))]
pub async fn create_product(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let product = state.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(put, path = "/api/products/{id}", tag = "admin", params(("id" = String, Path, description = "Product id")), request_body = crate::openapi::ProductInputDoc, responses((status = 200, description = "Updated", body = crate::openapi::ProductDoc), (status = 401, description = "Admin authentication required"), (status = 404, description = "Product not found")))]
pub async fn update_product(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.catalog.update(&id, input).await?))
}

#[utoipa::path(delete, path = "/api/products/{id}", tag = "admin", params(("id" = String, Path, description = "Product id")), responses((status = 200, description = "Deleted"), (status = 401, description = "Admin authentication required"), (status = 404, description = "Product not found")))]
pub async fn delete_product(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutput>, JsonApiError> {
    let removed = state.catalog.delete(&id).await?;
    Ok(Json(DeleteOutput { ok: true, removed }))
}
