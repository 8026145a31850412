//! Handlers for the shared player (`/player`).

use axum::extract::State;
use axum::Json;
use duet_core::error::CoreError;
use duet_core::player::{PlayerAction, PlayerState};
use duet_core::types::{now_millis, RoomId};
use duet_db::models::room::Room;
use duet_db::repositories::RoomUpdate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::body::{non_empty_string, JsonBody};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /player/state`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub room_id: Option<String>,
}

/// Request body for `POST /player/action`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub action: Option<String>,
    /// Kept raw; only `seek` validates it.
    #[serde(default)]
    pub position_ms: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateResponse {
    pub player_state: PlayerState,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /player/state
///
/// Read the room's player state, creating the default one on first access.
pub async fn get_state(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<PlayerStateRequest>,
) -> AppResult<Json<PlayerStateResponse>> {
    let room_id = input
        .room_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("roomId is required".into())))?;

    let user_id = auth.user.id;
    let room = update_room(&state, &room_id, &mut |room| {
        room.ensure_member(user_id)?;
        room.player_state_mut(now_millis());
        Ok(())
    })?;

    player_state_response(room)
}

/// POST /player/action
///
/// Apply `play`, `pause` or `seek` and return the updated state. The caller's
/// display name becomes `lastActionSource`.
pub async fn apply_action(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<PlayerActionRequest>,
) -> AppResult<Json<PlayerStateResponse>> {
    let (Some(room_id), Some(action)) = (input.room_id, input.action) else {
        return Err(AppError::Core(CoreError::Validation(
            "roomId and action are required".into(),
        )));
    };

    let user = &auth.user;
    let room = update_room(&state, &room_id, &mut |room| {
        room.ensure_member(user.id)?;
        let now = now_millis();
        let player = room.player_state_mut(now);
        let parsed = PlayerAction::parse(&action, input.position_ms.as_ref())?;
        player.apply(parsed, &user.name, now);
        Ok(())
    })?;

    tracing::debug!(room_id = %room.id, user_id = %user.id, %action, "Player action applied");

    player_state_response(room)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `update` on the room named by the raw `roomId`.
///
/// Ids are matched by their exact string, so only the lowercase hyphenated
/// form handed out by the API names a room. Anything else is reported the
/// same way as an unknown id.
fn update_room(
    state: &AppState,
    room_id: &str,
    update: RoomUpdate<'_>,
) -> AppResult<Room> {
    let not_found = || AppError::Core(CoreError::NotFound("Room not found".into()));

    let parsed: RoomId = room_id.parse().map_err(|_| not_found())?;
    if parsed.hyphenated().to_string() != room_id {
        return Err(not_found());
    }
    state.rooms.update(parsed, update)?.ok_or_else(not_found)
}

fn player_state_response(room: Room) -> AppResult<Json<PlayerStateResponse>> {
    let player_state = room.player_state.ok_or_else(|| {
        AppError::InternalError(format!("Room {} has no player state after update", room.id))
    })?;

    Ok(Json(PlayerStateResponse { player_state }))
}
