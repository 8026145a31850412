/// Identifier of a registered user.
pub type UserId = uuid::Uuid;

/// Identifier of a pairing room.
pub type RoomId = uuid::Uuid;

pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Milliseconds since the Unix epoch, the time format exposed to clients.
pub type EpochMillis = i64;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}
