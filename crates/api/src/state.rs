use std::sync::Arc;

use duet_db::repositories::{
    InMemoryRoomRepo, InMemorySessionRepo, InMemoryUserRepo, RoomRepository, SessionRepository,
    UserRepository,
};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
///
/// Cheaply cloneable: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Registered users.
    pub users: Arc<dyn UserRepository>,
    /// Bearer-token sessions.
    pub sessions: Arc<dyn SessionRepository>,
    /// Pairing rooms and their player state.
    pub rooms: Arc<dyn RoomRepository>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by the process-local stores.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            sessions: Arc::new(InMemorySessionRepo::new()),
            rooms: Arc::new(InMemoryRoomRepo::new()),
            config: Arc::new(config),
        }
    }
}
