use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use service::admin::catalog_store::CatalogStore;
use service::auth::domain::{LoginInput, RegisterInput, VisitorProfile};
use service::auth::AuthService;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;

/// Name of the cookie carrying the admin session token.
pub const ADMIN_COOKIE: &str = "admin_token";

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn CatalogStore>,
    pub auth: Arc<AuthService>,
}

/// Session token from the request cookies, if present.
pub fn admin_token(jar: &CookieJar) -> Option<String> {
    jar.get(ADMIN_COOKIE).map(|c| c.value().to_string())
}

#[derive(Serialize)]
pub struct AdminLoginOutput {
    pub ok: bool,
    pub role: &'static str,
}

#[derive(Serialize)]
pub struct MeOutput {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub ok: bool,
    pub username: String,
}

#[derive(Serialize)]
pub struct UserLoginOutput {
    pub ok: bool,
    pub role: &'static str,
    #[serde(flatten)]
    pub profile: VisitorProfile,
}

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Admin session opened"), (status = 401, description = "Invalid credentials")))]
pub async fn admin_login(
    State(state): State<ServerState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(CookieJar, Json<AdminLoginOutput>), JsonApiError> {
    let token = state.auth.admin_login(input).await?;
    let mut cookie = Cookie::new(ADMIN_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(AdminLoginOutput { ok: true, role: "admin" })))
}

#[utoipa::path(post, path = "/api/logout", tag = "auth", responses((status = 200, description = "Session closed")))]
pub async fn admin_logout(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> (CookieJar, Json<common::types::Ack>) {
    state.auth.admin_logout(admin_token(&jar).as_deref()).await;
    let mut removal = Cookie::from(ADMIN_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), Json(common::types::Ack::ok()))
}

#[utoipa::path(get, path = "/api/me", tag = "auth", responses((status = 200, description = "Current admin session status")))]
pub async fn me(State(state): State<ServerState>, jar: CookieJar) -> Json<MeOutput> {
    if state.auth.is_admin_session(admin_token(&jar).as_deref()).await {
        return Json(MeOutput {
            authenticated: true,
            role: Some("admin"),
            username: Some(state.auth.admin_username().to_string()),
        });
    }
    Json(MeOutput { authenticated: false, role: None, username: None })
}

#[utoipa::path(post, path = "/api/users/register", tag = "users", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Username already exists")))]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<RegisterOutput>), JsonApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { ok: true, username: user.username })))
}

#[utoipa::path(post, path = "/api/users/login", tag = "users", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 400, description = "Bad Request"), (status = 401, description = "Invalid username or password"), (status = 403, description = "Admin account")))]
pub async fn user_login(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<UserLoginOutput>, JsonApiError> {
    let user = state.auth.login(input).await?;
    Ok(Json(UserLoginOutput { ok: true, role: "user", profile: VisitorProfile::from(&user) }))
}
