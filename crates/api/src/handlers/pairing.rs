//! Handlers for the `/pairing` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use duet_core::error::CoreError;
use duet_core::pairing::RoomStatus;
use duet_core::types::RoomId;
use serde::{Deserialize, Serialize};

use crate::body::{non_empty_string, JsonBody};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /pairing/join`.
#[derive(Debug, Deserialize)]
pub struct JoinRoomRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: RoomId,
    pub code: String,
    pub status: RoomStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponse {
    pub room_id: RoomId,
    pub status: RoomStatus,
}

/// POST /pairing/code
///
/// Open a room hosted by the caller and hand out its 4-digit code.
pub async fn create_code(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<(StatusCode, Json<CreateRoomResponse>)> {
    let room = state.rooms.create(auth.user.id)?;

    tracing::info!(room_id = %room.id, code = %room.code, host = %auth.user.id, "Room created");

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            room_id: room.id,
            code: room.code.clone(),
            status: room.status(),
        }),
    ))
}

/// POST /pairing/join
///
/// Take the second seat of the room with the given code. Rejoining is allowed;
/// a different second user is refused with 409.
pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<JoinRoomRequest>,
) -> AppResult<Json<JoinRoomResponse>> {
    let code = input
        .code
        .ok_or_else(|| AppError::Core(CoreError::Validation("code is required".into())))?;

    let user_id = auth.user.id;
    let room = state
        .rooms
        .update_by_code(&code, &mut |room| room.join(user_id))?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("Invalid code".into())))?;

    tracing::info!(room_id = %room.id, user_id = %user_id, "Joined room");

    Ok(Json(JoinRoomResponse {
        room_id: room.id,
        status: room.status(),
    }))
}
