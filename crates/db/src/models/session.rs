//! Bearer-token session model.

use duet_core::types::{Timestamp, UserId};

/// A login session. The token is the lookup key.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: Timestamp,
}
