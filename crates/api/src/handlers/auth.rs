//! Handlers for the `/auth` resource (register, login, me, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use duet_core::error::CoreError;
use duet_db::models::user::{CreateUser, UserResponse};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::body::{non_empty_string, JsonBody};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, BearerToken};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub password: Option<String>,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Returned by `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create an account and log it in. Returns 201 with the user and a token.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // 1. All three fields are required.
    let (Some(name), Some(email), Some(password)) = (input.name, input.email, input.password)
    else {
        return Err(AppError::Core(CoreError::Validation(
            "name, email and password are required".into(),
        )));
    };

    // 2. Cheap duplicate check before paying for the hash. The store
    //    re-checks under its lock.
    if state.users.find_by_email(&email)?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    // 3. Hash and store.
    let password_hash = hash_password(&password)?;
    let user = state.users.create(CreateUser {
        name,
        email,
        password_hash,
    })?;

    // 4. Open the first session.
    let session = state.sessions.create(user.id)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(&user),
            token: session.token,
        }),
    ))
}

/// POST /auth/login
///
/// Exchange email + password for a new session token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (input.email, input.password) else {
        return Err(AppError::Core(CoreError::Validation(
            "email and password are required".into(),
        )));
    };

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let user = state.users.find_by_email(&email)?.ok_or_else(invalid)?;
    if !verify_password(&password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let session = state.sessions.create(user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: UserResponse::from(&user),
        token: session.token,
    }))
}

/// GET /auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserResponse::from(&auth.user),
    })
}

/// POST /auth/logout
///
/// Revoke the session named by the bearer token, if any. Always succeeds.
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<OkResponse>> {
    if let Some(token) = token {
        if state.sessions.delete(&token)? {
            tracing::info!("Session revoked");
        }
    }

    Ok(Json(OkResponse { ok: true }))
}
