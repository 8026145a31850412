//! Session store: opaque bearer tokens mapped to users.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use duet_core::error::CoreError;
use duet_core::types::UserId;
use uuid::Uuid;

use crate::models::session::Session;
use crate::poisoned;

/// Issue, resolve and revoke bearer-token sessions.
///
/// A user may hold any number of sessions at once. Sessions never expire.
pub trait SessionRepository: Send + Sync {
    /// Create a session with a fresh random token.
    fn create(&self, user_id: UserId) -> Result<Session, CoreError>;

    fn find_by_token(&self, token: &str) -> Result<Option<Session>, CoreError>;

    /// Remove a session. Returns `true` if one existed.
    fn delete(&self, token: &str) -> Result<bool, CoreError>;
}

/// Process-local [`SessionRepository`].
#[derive(Default)]
pub struct InMemorySessionRepo {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepo {
    fn create(&self, user_id: UserId) -> Result<Session, CoreError> {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            created_at: Utc::now(),
        };

        self.sessions
            .write()
            .map_err(poisoned("session"))?
            .insert(session.token.clone(), session.clone());

        Ok(session)
    }

    fn find_by_token(&self, token: &str) -> Result<Option<Session>, CoreError> {
        let sessions = self.sessions.read().map_err(poisoned("session"))?;
        Ok(sessions.get(token).cloned())
    }

    fn delete(&self, token: &str) -> Result<bool, CoreError> {
        let mut sessions = self.sessions.write().map_err(poisoned("session"))?;
        Ok(sessions.remove(token).is_some())
    }
}
