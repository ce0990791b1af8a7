//! Shared test harness for integration tests.
//!
//! Builds the real router over an in-memory SQLite database with migrations
//! applied and the default accounts seeded, then drives it with oneshot
//! requests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use servicepulse::{
    api::build_router,
    config::{AppConfig, AuthConfig, DatabaseConfig},
    storage::{
        create_pool, ensure_default_users,
        repositories::{SqlxServiceRepository, SqlxUserRepository},
        run_migrations,
    },
};

/// Signing secret shared between the app under test and tests that need to
/// forge or craft tokens directly.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub users: Arc<SqlxUserRepository>,
    pub services: Arc<SqlxServiceRepository>,
}

/// Stand up the full application against a fresh in-memory database.
pub async fn setup_test_app() -> TestApp {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            ..DatabaseConfig::default()
        },
        auth: AuthConfig { jwt_secret: TEST_JWT_SECRET.into(), token_ttl_seconds: 3600 },
        ..AppConfig::default()
    };

    let pool = create_pool(&config.database).await.expect("create test database pool");
    run_migrations(&pool).await.expect("run migrations");

    let users = SqlxUserRepository::new(pool.clone());
    ensure_default_users(&users).await.expect("seed default users");

    let router = build_router(pool.clone(), &config).expect("build router");

    TestApp {
        router,
        users: Arc::new(users),
        services: Arc::new(SqlxServiceRepository::new(pool)),
    }
}

/// Send one request through the router.
pub async fn send_request(
    app: &TestApp,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    app.router.clone().oneshot(request).await.expect("send request")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Log in through the real endpoint and return the issued token.
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = send_request(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed for {}", username);

    let body = body_json(response).await;
    body["token"].as_str().expect("token in login response").to_string()
}
