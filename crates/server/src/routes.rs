use std::path::Path;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

pub mod admin;
pub mod auth;
pub mod products;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    crate::metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public reads, visitor accounts, the
/// admin-gated catalog writes, the dashboard page and static assets.
pub fn build_router(state: ServerState, static_dir: impl AsRef<Path>, cors: CorsLayer) -> Router {
    let static_dir = static_dir.as_ref();
    let assets = ServeDir::new(static_dir);
    let dashboard = ServeFile::new(static_dir.join("admin.html"));

    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/login", post(auth::admin_login))
        .route("/api/logout", post(auth::admin_logout))
        .route("/api/me", get(auth::me))
        .route("/api/users/register", post(auth::register))
        .route("/api/users/login", post(auth::user_login))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:id", get(products::get_product))
        .route_service("/admin", dashboard);

    // Catalog writes, gated on the admin session cookie
    let admin_routes = Router::new()
        .route("/api/products", post(admin::create_product))
        .route(
            "/api/products/:id",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin::require_admin,
        ));

    public
        .merge(admin_routes)
        .fallback_service(assets)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
