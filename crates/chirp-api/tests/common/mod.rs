use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use chirp_api::{AppState, AppStateInner, router};
use chirp_db::Database;

/// Fixed signing key so tests can decode the tokens the app issues.
#[allow(dead_code)]
pub const TEST_JWT_KEY: &[u8] = b"test-signing-key-32-bytes-long!!";

/// Fresh app over an in-memory store.
#[allow(dead_code)]
pub fn test_app() -> Router {
    let db = Database::open_in_memory().expect("in-memory db");
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_key: TEST_JWT_KEY.to_vec(),
    });
    router(state)
}

/// Drive one request through the router and decode the JSON body.
#[allow(dead_code)]
pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Sign up a user and return their bearer token.
#[allow(dead_code)]
pub async fn signup(app: &Router, name: &str, handle: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/signup",
        None,
        Some(serde_json::json!({ "name": name, "handle": handle, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {body}");
    body["token"].as_str().expect("token in signup body").to_string()
}
