//! Pairing room model.

use chrono::Utc;
use duet_core::error::CoreError;
use duet_core::pairing::{self, RoomStatus};
use duet_core::player::PlayerState;
use duet_core::types::{EpochMillis, RoomId, Timestamp, UserId};
use uuid::Uuid;

/// A two-person room identified by id and by its 4-digit code.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub code: String,
    pub host_user_id: UserId,
    /// The second participant, once someone has joined.
    pub joined_user_id: Option<UserId>,
    pub created_at: Timestamp,
    /// Created on first access by either participant.
    pub player_state: Option<PlayerState>,
}

impl Room {
    /// A fresh room waiting for its second participant.
    pub fn new(code: String, host_user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            host_user_id,
            joined_user_id: None,
            created_at: Utc::now(),
            player_state: None,
        }
    }

    pub fn status(&self) -> RoomStatus {
        RoomStatus::from_joined(self.joined_user_id)
    }

    /// Fails with `Forbidden` unless `user_id` is the host or the joined user.
    pub fn ensure_member(&self, user_id: UserId) -> Result<(), CoreError> {
        pairing::check_member(self.host_user_id, self.joined_user_id, user_id)
    }

    /// Seat `user_id` as the joined user. Rejoining is a no-op.
    pub fn join(&mut self, user_id: UserId) -> Result<(), CoreError> {
        pairing::check_join(self.joined_user_id, user_id)?;
        self.joined_user_id = Some(user_id);
        Ok(())
    }

    /// The player state, initializing it with `now` on first access.
    pub fn player_state_mut(&mut self, now: EpochMillis) -> &mut PlayerState {
        self.player_state.get_or_insert_with(|| PlayerState::new(now))
    }
}
