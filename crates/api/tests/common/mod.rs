//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use duet_api::config::ServerConfig;
use duet_api::router::build_app_router;
use duet_api::state::AppState;

/// Build a test `ServerConfig` with the production defaults on a loopback
/// address.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router over fresh in-memory stores.
///
/// Clones of the returned router share the same stores, so a test can send
/// several requests against one state with `app.clone()`.
pub fn build_test_app() -> Router {
    build_app_router(AppState::in_memory(test_config()))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an arbitrary byte payload, optionally authenticated.
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: impl Into<Body>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    send(app, builder.body(body.into()).unwrap()).await
}

/// Collect the body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect the body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A registered user as seen by the tests.
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub token: String,
}

/// Register a user through the API and return its id and token.
pub async fn register(app: &Router, name: &str, email: &str) -> TestUser {
    let body = json!({ "name": name, "email": email, "password": "s3cret-pass" });
    let response = post_json(app.clone(), "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    TestUser {
        id: json["user"]["id"].as_str().unwrap().to_string(),
        name: name.to_string(),
        token: json["token"].as_str().unwrap().to_string(),
    }
}

/// Create a room hosted by `host` and return `(room_id, code)`.
pub async fn create_room(app: &Router, host: &TestUser) -> (String, String) {
    let response = post_json_auth(app.clone(), "/pairing/code", json!({}), &host.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    (
        json["roomId"].as_str().unwrap().to_string(),
        json["code"].as_str().unwrap().to_string(),
    )
}

/// Join the room with `code` as `user`, asserting success.
pub async fn join_room(app: &Router, user: &TestUser, code: &str) {
    let response = post_json_auth(
        app.clone(),
        "/pairing/join",
        json!({ "code": code }),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Register a host and a guest and pair them in a fresh room.
///
/// Returns `(host, guest, room_id)`.
pub async fn paired_room(app: &Router) -> (TestUser, TestUser, String) {
    let host = register(app, "Alice", "alice@example.com").await;
    let guest = register(app, "Bob", "bob@example.com").await;
    let (room_id, code) = create_room(app, &host).await;
    join_room(app, &guest, &code).await;
    (host, guest, room_id)
}
