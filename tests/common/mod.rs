// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use fit_track::config::Config;
use fit_track::db::{Database, FirestoreDb, MemoryDb};
use fit_track::middleware::auth::create_jwt;
use fit_track::models::Session;
use fit_track::routes::create_router;
use fit_track::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by an in-memory store.
/// Returns the router, the shared state and the store itself.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryDb>) {
    let memory = Arc::new(MemoryDb::new());
    let db: Arc<dyn Database> = memory.clone();

    let state = Arc::new(AppState {
        config: Config::test_default(),
        db,
    });

    (create_router(state.clone()), state, memory)
}

/// Create a test app whose store fails every call.
#[allow(dead_code)]
pub fn create_offline_app() -> axum::Router {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: Arc::new(FirestoreDb::new_mock()),
    });
    create_router(state)
}

/// Session token signed with the test config's key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str) -> String {
    let session = Session {
        user_id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
    };
    create_jwt(&session, &Config::test_default().jwt_signing_key).expect("Failed to create JWT")
}

/// Send a JSON request, optionally authenticated.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Read the response body as JSON, asserting the status first.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return `(user_id, token)`.
#[allow(dead_code)]
pub async fn register(app: &axum::Router, email: &str) -> (String, String) {
    let response = send_json(
        app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({ "email": email, "password": "correct horse battery" })),
    )
    .await;
    let body = json_body(response, StatusCode::CREATED).await;

    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}
