use axum::{
    extract::{Path, State},
    Json,
};

use service::catalog::Product;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/products", tag = "products", responses((status = 200, description = "Whole catalog, newest first", body = [crate::openapi::ProductDoc])))]
pub async fn list_products(State(state): State<ServerState>) -> Json<Vec<Product>> {
    Json(state.catalog.list().await)
}

#[utoipa::path(get, path = "/api/products/{id}", tag = "products", params(("id" = String, Path, description = "Product id")), responses((status = 200, description = "OK", body = crate::openapi::ProductDoc), (status = 404, description = "Product not found")))]
pub async fn get_product(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, JsonApiError> {
    state
        .catalog
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Product").into())
}
