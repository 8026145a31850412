//! HTTP-level integration tests for the `/pairing` endpoints.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{
    body_json, create_room, join_room, post_json, post_json_auth, post_raw, register,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Room creation
// ---------------------------------------------------------------------------

/// Creating a room returns 201 with a 4-digit code and status `waiting`.
#[tokio::test]
async fn test_create_room() {
    let app = common::build_test_app();
    let alice = register(&app, "Alice", "alice@example.com").await;

    let response = post_json_auth(app, "/pairing/code", json!({}), &alice.token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["roomId"].is_string());
    assert_eq!(json["status"], "waiting");

    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 4);
    let value: u16 = code.parse().unwrap();
    assert!((1000..=9999).contains(&value));
}

/// Codes handed out to live rooms never repeat.
#[tokio::test]
async fn test_room_codes_are_unique() {
    let app = common::build_test_app();
    let alice = register(&app, "Alice", "alice@example.com").await;

    let mut codes = HashSet::new();
    let mut ids = HashSet::new();
    for _ in 0..200 {
        let (room_id, code) = create_room(&app, &alice).await;
        assert!(codes.insert(code), "duplicate room code");
        assert!(ids.insert(room_id), "duplicate room id");
    }
}

/// Creating a room requires a session.
#[tokio::test]
async fn test_create_room_requires_auth() {
    let app = common::build_test_app();

    let response = post_json(app, "/pairing/code", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

// ---------------------------------------------------------------------------
// Joining
// ---------------------------------------------------------------------------

/// A second user joins by code and the room becomes `paired`.
#[tokio::test]
async fn test_join_room() {
    let app = common::build_test_app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;
    let (room_id, code) = create_room(&app, &alice).await;

    let response =
        post_json_auth(app, "/pairing/join", json!({ "code": code }), &bob.token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["roomId"], room_id.as_str());
    assert_eq!(json["status"], "paired");
}

/// Joining again as the same user is idempotent.
#[tokio::test]
async fn test_rejoin_is_idempotent() {
    let app = common::build_test_app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;
    let (_room_id, code) = create_room(&app, &alice).await;

    join_room(&app, &bob, &code).await;
    join_room(&app, &bob, &code).await;
}

/// A third user cannot take the seat, and the first guest keeps it.
#[tokio::test]
async fn test_join_full_room_conflicts() {
    let app = common::build_test_app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;
    let carol = register(&app, "Carol", "carol@example.com").await;
    let (room_id, code) = create_room(&app, &alice).await;
    join_room(&app, &bob, &code).await;

    let response = post_json_auth(
        app.clone(),
        "/pairing/join",
        json!({ "code": code }),
        &carol.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Room already full");

    // Bob still has access, Carol does not.
    let body = json!({ "roomId": room_id });
    let response = post_json_auth(app.clone(), "/player/state", body.clone(), &bob.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json_auth(app, "/player/state", body, &carol.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// The host may take the joined seat of their own room.
#[tokio::test]
async fn test_host_can_join_own_room() {
    let app = common::build_test_app();
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;
    let (_room_id, code) = create_room(&app, &alice).await;

    join_room(&app, &alice, &code).await;

    // The seat is now held by the host, so nobody else can join.
    let response =
        post_json_auth(app, "/pairing/join", json!({ "code": code }), &bob.token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Missing code is a 400; an unknown code is a 404.
#[tokio::test]
async fn test_join_validation() {
    let app = common::build_test_app();
    let bob = register(&app, "Bob", "bob@example.com").await;

    let response = post_json_auth(app.clone(), "/pairing/join", json!({}), &bob.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "code is required");

    let response =
        post_json_auth(app, "/pairing/join", json!({ "code": "0000" }), &bob.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Invalid code");
}

/// Authentication is checked before the body is read.
#[tokio::test]
async fn test_join_checks_auth_before_body() {
    let app = common::build_test_app();

    let response = post_raw(app, "/pairing/join", "{broken", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
