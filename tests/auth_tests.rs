use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use sweetshop::config::Config;
use tower::ServiceExt;

/// Bootstrap admin seeded by migration (must match m20260601_create_users.rs)
const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // Single connection so every query sees the same in-memory database
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.observability.metrics_enabled = false;

    let state = sweetshop::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    sweetshop::api::router(state).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "testuser",
            "email": "test@example.com",
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["username"], "testuser");
    assert_eq!(body["data"]["user"]["email"], "test@example.com");
    assert_eq!(body["data"]["user"]["role"], "user");

    let register_token = body["data"]["token"].as_str().unwrap().to_string();

    // The registration token is immediately usable
    let (status, _) = send(&app, "GET", "/api/sweets", Some(&register_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // And so is a fresh login token
    let login_token = login(&app, "test@example.com", "password123").await;
    let (status, _) = send(&app, "GET", "/api/sweets", Some(&login_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_validation() {
    let app = spawn_app().await;

    let cases = [
        json!({"username": "ab", "email": "a@example.com", "password": "password123"}),
        json!({"username": "valid", "email": "not-an-email", "password": "password123"}),
        json!({"username": "valid", "email": "a@example.com", "password": "short"}),
    ];

    for payload in cases {
        let (status, body) =
            send(&app, "POST", "/api/auth/register", None, Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = spawn_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "first-user",
            "email": "taken@example.com",
            "password": "password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "somebody-else",
            "email": "taken@example.com",
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");

    // The first account's credentials remain valid
    login(&app, "taken@example.com", "password123").await;
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    // Wrong password yields the identical error
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": ADMIN_EMAIL, "password": "wrong-password"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_unauthenticated_requests_rejected() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/sweets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");

    let (status, body) = send(&app, "GET", "/api/sweets", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");

    // A rejected write causes no state change
    let (status, _) = send(
        &app,
        "POST",
        "/api/sweets",
        None,
        Some(json!({"name": "Sneaky", "category": "Candy", "price": 1.0, "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = send(&app, "GET", "/api/sweets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_bootstrap_admin_can_authenticate() {
    let app = spawn_app().await;

    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    // Admin clears the role gate; a missing sweet is 404, not 403
    let (status, body) = send(
        &app,
        "DELETE",
        "/api/sweets/00000000-0000-0000-0000-000000000000",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Sweet not found");
}
