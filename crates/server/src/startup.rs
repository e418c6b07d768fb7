use std::{path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth};
use service::{
    auth::{service::AuthConfig, AuthService, InMemorySessionStore},
    file::{ProductStore, UserStore},
    runtime,
};

pub const PRODUCTS_FILE: &str = "products.json";
pub const USERS_FILE: &str = "users.json";

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the stores and the auth service for `cfg`. Sessions start empty.
pub fn build_state(cfg: &AppConfig) -> auth::ServerState {
    let data_dir = Path::new(&cfg.storage.data_dir);
    let products = ProductStore::new(data_dir.join(PRODUCTS_FILE));
    let users = UserStore::new(data_dir.join(USERS_FILE));
    let auth_service = AuthService::new(
        users,
        Arc::new(InMemorySessionStore::new()),
        AuthConfig {
            admin_username: cfg.admin.username.clone(),
            admin_password: cfg.admin.password.clone(),
        },
    );
    auth::ServerState { catalog: products, auth: Arc::new(auth_service) }
}

/// Full application router for `cfg`.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(cfg), &cfg.storage.static_dir, build_cors())
}

/// Public entry: load configuration, then run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = AppConfig::load_or_default()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    run_with_config(cfg).await
}

/// Run the HTTP server with an already loaded configuration.
/// Expects logging to be initialized already.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.static_dir, &cfg.storage.data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    service::storage::metrics::register();

    let app = build_app(&cfg);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, data_dir = %cfg.storage.data_dir, static_dir = %cfg.storage.static_dir, "storefront listening");
    println!("storefront listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
