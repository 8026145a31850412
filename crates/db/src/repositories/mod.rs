//! Repository layer.
//!
//! Each store is a trait object-safe enough to live behind `Arc<dyn ...>` in
//! the application state. The in-memory implementations guard their maps with
//! an `RwLock` and run every read-modify-write under a single write guard.

pub mod room_repo;
pub mod session_repo;
pub mod user_repo;

pub use room_repo::{InMemoryRoomRepo, RoomRepository, RoomUpdate};
pub use session_repo::{InMemorySessionRepo, SessionRepository};
pub use user_repo::{InMemoryUserRepo, UserRepository};
