//! Room store, indexed by id and by pairing code.

use std::collections::HashMap;
use std::sync::RwLock;

use duet_core::error::CoreError;
use duet_core::pairing::generate_unique_code;
use duet_core::types::{RoomId, UserId};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::room::Room;
use crate::poisoned;

/// Mutation applied to a room while the store holds exclusive access to it.
pub type RoomUpdate<'a> = &'a mut dyn FnMut(&mut Room) -> Result<(), CoreError>;

/// Creation, lookup and atomic mutation of rooms.
pub trait RoomRepository: Send + Sync {
    /// Allocate a code not held by any live room and create a room for
    /// `host_user_id`. Fails with `Conflict` when every code is in use.
    fn create(&self, host_user_id: UserId) -> Result<Room, CoreError>;

    /// Run `update` on the room with exclusive access and return the room
    /// as it stands afterwards.
    ///
    /// Returns `Ok(None)` when no room has this id. If `update` fails, its
    /// error is returned and changes it made before failing are kept.
    fn update(&self, id: RoomId, update: RoomUpdate<'_>) -> Result<Option<Room>, CoreError>;

    /// Same as [`RoomRepository::update`], addressing the room by code.
    fn update_by_code(&self, code: &str, update: RoomUpdate<'_>)
        -> Result<Option<Room>, CoreError>;
}

struct RoomIndex {
    by_id: HashMap<RoomId, Room>,
    id_by_code: HashMap<String, RoomId>,
    rng: StdRng,
}

/// Process-local [`RoomRepository`]. Rooms are never evicted.
pub struct InMemoryRoomRepo {
    inner: RwLock<RoomIndex>,
}

impl InMemoryRoomRepo {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A store whose code sequence is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            inner: RwLock::new(RoomIndex {
                by_id: HashMap::new(),
                id_by_code: HashMap::new(),
                rng,
            }),
        }
    }
}

impl Default for InMemoryRoomRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRepository for InMemoryRoomRepo {
    fn create(&self, host_user_id: UserId) -> Result<Room, CoreError> {
        let mut guard = self.inner.write().map_err(poisoned("room"))?;
        let index = &mut *guard;

        let code = generate_unique_code(&mut index.rng, index.id_by_code.len(), |code| {
            index.id_by_code.contains_key(code)
        })?;

        let room = Room::new(code, host_user_id);
        index.id_by_code.insert(room.code.clone(), room.id);
        index.by_id.insert(room.id, room.clone());

        tracing::debug!(
            room_id = %room.id,
            code = %room.code,
            live_rooms = index.by_id.len(),
            "Allocated room"
        );
        Ok(room)
    }

    fn update(&self, id: RoomId, update: RoomUpdate<'_>) -> Result<Option<Room>, CoreError> {
        let mut index = self.inner.write().map_err(poisoned("room"))?;
        let Some(room) = index.by_id.get_mut(&id) else {
            return Ok(None);
        };
        update(room)?;
        Ok(Some(room.clone()))
    }

    fn update_by_code(
        &self,
        code: &str,
        update: RoomUpdate<'_>,
    ) -> Result<Option<Room>, CoreError> {
        let mut guard = self.inner.write().map_err(poisoned("room"))?;
        let index = &mut *guard;
        let Some(room) = index
            .id_by_code
            .get(code)
            .and_then(|id| index.by_id.get_mut(id))
        else {
            return Ok(None);
        };
        update(room)?;
        Ok(Some(room.clone()))
    }
}
