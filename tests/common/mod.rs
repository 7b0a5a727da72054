// SPDX-License-Identifier: MIT

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use pomodoro_timer::config::Config;
use pomodoro_timer::db::Db;
use pomodoro_timer::routes::create_router;
use pomodoro_timer::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Db::in_memory().await.expect("in-memory database");

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Send a JSON request, optionally with a bearer token.
#[allow(dead_code)]
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response<axum::body::Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and return the bearer token.
#[allow(dead_code)]
pub async fn register_user(app: &Router, email: &str, password: &str) -> String {
    let response = send_json(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;

    assert_eq!(response.status(), 201, "registration should succeed");

    let body = read_json(response).await;
    body["token"].as_str().expect("token in response").to_string()
}
