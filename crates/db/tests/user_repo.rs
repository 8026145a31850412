//! Tests for the in-memory identity and session stores.

use assert_matches::assert_matches;
use duet_core::error::CoreError;
use duet_db::models::user::{CreateUser, UserResponse};
use duet_db::repositories::{
    InMemorySessionRepo, InMemoryUserRepo, SessionRepository, UserRepository,
};
use uuid::Uuid;

fn new_user(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[test]
fn create_user_is_findable_by_id_and_email() {
    let repo = InMemoryUserRepo::new();

    let user = repo.create(new_user("Alice", "alice@example.com")).unwrap();

    let by_id = repo.find_by_id(user.id).unwrap().expect("user by id");
    assert_eq!(by_id.email, "alice@example.com");

    let by_email = repo
        .find_by_email("alice@example.com")
        .unwrap()
        .expect("user by email");
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.name, "Alice");
}

#[test]
fn duplicate_email_conflicts_regardless_of_other_fields() {
    let repo = InMemoryUserRepo::new();
    repo.create(new_user("Alice", "alice@example.com")).unwrap();

    let result = repo.create(CreateUser {
        name: "Someone Else".into(),
        email: "alice@example.com".into(),
        password_hash: "different".into(),
    });

    assert_matches!(result, Err(CoreError::Conflict(msg)) if msg == "Email already exists");
}

#[test]
fn email_lookup_is_case_sensitive() {
    let repo = InMemoryUserRepo::new();
    repo.create(new_user("Alice", "alice@example.com")).unwrap();

    assert!(repo.find_by_email("Alice@Example.com").unwrap().is_none());
    // A differently-cased email is a distinct account.
    assert!(repo.create(new_user("Alice 2", "Alice@Example.com")).is_ok());
}

#[test]
fn unknown_user_is_none() {
    let repo = InMemoryUserRepo::new();
    assert!(repo.find_by_id(Uuid::new_v4()).unwrap().is_none());
    assert!(repo.find_by_email("ghost@example.com").unwrap().is_none());
}

#[test]
fn user_response_omits_password_hash() {
    let repo = InMemoryUserRepo::new();
    let user = repo.create(new_user("Alice", "alice@example.com")).unwrap();

    let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 3);
    assert_eq!(json["id"], user.id.to_string());
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["name"], "Alice");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn session_tokens_resolve_until_deleted() {
    let repo = InMemorySessionRepo::new();
    let user_id = Uuid::new_v4();

    let session = repo.create(user_id).unwrap();
    let found = repo.find_by_token(&session.token).unwrap().expect("session");
    assert_eq!(found.user_id, user_id);

    assert!(repo.delete(&session.token).unwrap());
    assert!(repo.find_by_token(&session.token).unwrap().is_none());
}

#[test]
fn delete_unknown_token_is_noop() {
    let repo = InMemorySessionRepo::new();
    assert!(!repo.delete("not-a-token").unwrap());
}

#[test]
fn user_can_hold_multiple_sessions() {
    let repo = InMemorySessionRepo::new();
    let user_id = Uuid::new_v4();

    let first = repo.create(user_id).unwrap();
    let second = repo.create(user_id).unwrap();
    assert_ne!(first.token, second.token);

    repo.delete(&first.token).unwrap();
    assert!(repo.find_by_token(&second.token).unwrap().is_some());
}
