//! Room pairing rules: code allocation, membership and the join guard.
//!
//! A room is shared by at most two users, its host and one joined user. The
//! functions here take plain ids so both the repositories and tests can apply
//! them without constructing a full room.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::UserId;

// ---------------------------------------------------------------------------
// Room codes
// ---------------------------------------------------------------------------

/// Smallest room code (inclusive).
pub const ROOM_CODE_MIN: u16 = 1000;

/// Largest room code (inclusive).
pub const ROOM_CODE_MAX: u16 = 9999;

/// Number of distinct room codes.
pub const ROOM_CODE_SPACE: usize = (ROOM_CODE_MAX - ROOM_CODE_MIN + 1) as usize;

/// Draw a 4-digit code uniformly from `[ROOM_CODE_MIN, ROOM_CODE_MAX]`.
pub fn random_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random_range(ROOM_CODE_MIN..=ROOM_CODE_MAX).to_string()
}

/// Draw codes until `is_taken` rejects none of them.
///
/// `live_rooms` is the number of codes currently held. When every code is
/// held the search would never end, so a `Conflict` is returned instead.
pub fn generate_unique_code<R, F>(
    rng: &mut R,
    live_rooms: usize,
    mut is_taken: F,
) -> Result<String, CoreError>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    if live_rooms >= ROOM_CODE_SPACE {
        return Err(CoreError::Conflict("No room codes available".into()));
    }

    loop {
        let code = random_room_code(rng);
        if !is_taken(&code) {
            return Ok(code);
        }
    }
}

// ---------------------------------------------------------------------------
// Status and membership
// ---------------------------------------------------------------------------

/// Pairing status reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Created, nobody has joined yet.
    Waiting,
    /// A second user has joined.
    Paired,
}

impl RoomStatus {
    pub fn from_joined(joined_user_id: Option<UserId>) -> Self {
        match joined_user_id {
            Some(_) => RoomStatus::Paired,
            None => RoomStatus::Waiting,
        }
    }
}

/// Returns `true` if `user_id` is the host or the joined user.
pub fn is_member(host_user_id: UserId, joined_user_id: Option<UserId>, user_id: UserId) -> bool {
    host_user_id == user_id || joined_user_id == Some(user_id)
}

/// Reject callers who are not party to the room.
pub fn check_member(
    host_user_id: UserId,
    joined_user_id: Option<UserId>,
    user_id: UserId,
) -> Result<(), CoreError> {
    if is_member(host_user_id, joined_user_id, user_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Forbidden".into()))
    }
}

/// Check whether `candidate` may take the joined seat.
///
/// The seat may be taken when it is empty or already held by the candidate.
/// The host is not excluded.
pub fn check_join(joined_user_id: Option<UserId>, candidate: UserId) -> Result<(), CoreError> {
    match joined_user_id {
        Some(existing) if existing != candidate => {
            Err(CoreError::Conflict("Room already full".into()))
        }
        _ => Ok(()),
    }
}
