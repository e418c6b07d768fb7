use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    data_dir: PathBuf,
}

impl TestApp {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("storefront_flow_{}", Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.data_dir = root.join("data").to_string_lossy().into_owned();
        cfg.storage.static_dir = root.join("public").to_string_lossy().into_owned();
        Self { router: server::build_app(&cfg), data_dir: root.join("data") }
    }

    fn products_file(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Option<String>, Value)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let cookie = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("admin_token="))
            .map(|v| v.split(';').next().unwrap_or_default().to_string());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, cookie, body))
    }

    async fn login_admin(&self) -> anyhow::Result<String> {
        let (status, cookie, body) = self
            .send(json_request("POST", "/api/login", None, json!({"username": "alaa", "password": "0000"})))
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "role": "admin"}));
        cookie.ok_or_else(|| anyhow::anyhow!("login did not set admin_token"))
    }
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn admin_session_lifecycle() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, cookie, body) = app
        .send(json_request("POST", "/api/login", None, json!({"username": "alaa", "password": "1234"})))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(cookie.is_none());
    assert_eq!(body, json!({"error": "Invalid credentials"}));

    let (_, _, body) = app.send(empty_request("GET", "/api/me", None)).await?;
    assert_eq!(body, json!({"authenticated": false}));

    let cookie = app.login_admin().await?;
    let (status, _, body) = app.send(empty_request("GET", "/api/me", Some(&cookie))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"authenticated": true, "role": "admin", "username": "alaa"}));

    let (status, _, body) = app.send(empty_request("POST", "/api/logout", Some(&cookie))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));

    // The old token is dead even if the client keeps sending it.
    let (_, _, body) = app.send(empty_request("GET", "/api/me", Some(&cookie))).await?;
    assert_eq!(body, json!({"authenticated": false}));
    let (status, _, _) = app
        .send(json_request("POST", "/api/products", Some(&cookie), json!({"name": "Lamp"})))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logging out without a session still acknowledges.
    let (status, _, body) = app.send(empty_request("POST", "/api/logout", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
    Ok(())
}

#[tokio::test]
async fn catalog_writes_require_admin_session() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, body) = app
        .send(json_request("POST", "/api/products", None, json!({"name": "Lamp", "price": 10})))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Admin authentication required"}));

    let (status, _, _) = app
        .send(json_request("PUT", "/api/products/p1", Some("admin_token=forged"), json!({"name": "X"})))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = app.send(empty_request("DELETE", "/api/products/p1", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Rejected writes never reached the store.
    assert!(tokio::fs::metadata(app.products_file()).await.is_err());
    Ok(())
}

#[tokio::test]
async fn public_catalog_reads() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, body) = app.send(empty_request("GET", "/api/products", None)).await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().into_iter().flatten().filter_map(|p| p["id"].as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);

    let (status, _, body) = app.send(empty_request("GET", "/api/products/p3", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "USB-C Multiport Hub");
    assert_eq!(body["price"], json!(29.0));

    let (status, _, body) = app.send(empty_request("GET", "/api/products/missing", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn admin_manages_catalog() -> anyhow::Result<()> {
    let app = TestApp::new();
    let cookie = app.login_admin().await?;

    let (status, _, created) = app
        .send(json_request(
            "POST",
            "/api/products",
            Some(&cookie),
            json!({"name": "Monitor Arm", "price": "120", "category": "Office"}),
        ))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], json!(120.0));
    assert_eq!(created["description"], "");
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(id.starts_with("p-"));

    let (_, _, listed) = app.send(empty_request("GET", "/api/products", None)).await?;
    assert_eq!(listed[0]["id"], json!(id));
    assert_eq!(listed.as_array().map(Vec::len), Some(4));

    let (status, _, body) = app
        .send(json_request("POST", "/api/products", Some(&cookie), json!({"price": 5})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Name is required"}));

    let (status, _, updated) = app
        .send(json_request("PUT", &format!("/api/products/{id}"), Some(&cookie), json!({"price": 99.5, "name": ""})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Monitor Arm");
    assert_eq!(updated["price"], json!(99.5));
    assert_eq!(updated["category"], "Office");

    let (status, _, _) = app
        .send(json_request("PUT", "/api/products/nope", Some(&cookie), json!({"name": "X"})))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = app
        .send(empty_request("DELETE", &format!("/api/products/{id}"), Some(&cookie)))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["removed"], updated);

    let (status, _, _) = app
        .send(empty_request("DELETE", &format!("/api/products/{id}"), Some(&cookie)))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let stored: Value = serde_json::from_slice(&tokio::fs::read(app.products_file()).await?)?;
    assert_eq!(stored.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn visitor_accounts() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, body) = app
        .send(json_request("POST", "/api/users/register", None, json!({"username": " bob ", "password": "x", "fullName": "Bob B"})))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"ok": true, "username": "bob"}));

    let (status, _, body) = app
        .send(json_request("POST", "/api/users/register", None, json!({"username": "BOB", "password": "y"})))
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "This username is already taken"}));

    let (status, _, _) = app
        .send(json_request("POST", "/api/users/register", None, json!({"username": "alaa", "password": "z"})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(json_request("POST", "/api/users/register", None, json!({"username": "carol"})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, cookie, body) = app
        .send(json_request("POST", "/api/users/login", None, json!({"username": "bob", "password": "x"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(cookie.is_none());
    assert_eq!(body, json!({"ok": true, "role": "user", "username": "bob", "fullName": "Bob B"}));

    let (status, _, _) = app
        .send(json_request("POST", "/api/users/login", None, json!({"username": "bob", "password": "nope"})))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .send(json_request("POST", "/api/users/login", None, json!({"username": "alaa", "password": "0000"})))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"error": "Use the admin dashboard to sign in as admin"}));

    let (status, _, _) = app
        .send(json_request("POST", "/api/users/login", None, json!({"username": "bob"})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Visitor login grants nothing on the admin side.
    let (_, _, body) = app.send(empty_request("GET", "/api/me", None)).await?;
    assert_eq!(body, json!({"authenticated": false}));
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, body) = app.send(empty_request("GET", "/health", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, _, doc) = app.send(empty_request("GET", "/api-docs/openapi.json", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/products"].is_object());

    // Touch the store so the load counter has a sample.
    app.send(empty_request("GET", "/api/products", None)).await?;
    let resp = app.router.clone().oneshot(empty_request("GET", "/metrics", None)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("storefront_store_loads_total"));
    Ok(())
}

#[tokio::test]
async fn loosely_typed_bodies_follow_field_rules() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, body) = app
        .send(json_request("POST", "/api/users/register", None, json!({"username": 5, "password": "x"})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Username and password are required"}));

    let (status, _, body) = app
        .send(json_request("POST", "/api/users/login", None, json!({"username": ["bob"], "password": "x"})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Username and password are required"}));

    // A non-string name is ignored; the price still applies.
    let cookie = app.login_admin().await?;
    let (status, _, body) = app
        .send(json_request("PUT", "/api/products/p1", Some(&cookie), json!({"name": 123, "price": 5})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Smart Desk Lamp");
    assert_eq!(body["price"], json!(5.0));
    Ok(())
}

#[tokio::test]
async fn missing_or_malformed_bodies_get_json_errors() -> anyhow::Result<()> {
    let app = TestApp::new();

    // No body at all reads as empty credentials.
    let (status, cookie, body) = app.send(empty_request("POST", "/api/login", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(cookie.is_none());
    assert_eq!(body, json!({"error": "Invalid credentials"}));

    let req = Request::builder()
        .method("POST")
        .uri("/api/users/register")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("username=bob&password=x"))?;
    let (status, _, body) = app.send(req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Username and password are required"}));

    let req = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))?;
    let (status, _, body) = app.send(req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON body"}));

    // Gate still answers first for admin writes with a broken body.
    let req = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))?;
    let (status, _, _) = app.send(req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
