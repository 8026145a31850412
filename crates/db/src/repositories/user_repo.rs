//! Identity store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use duet_core::error::CoreError;
use duet_core::types::UserId;
use uuid::Uuid;

use crate::models::user::{CreateUser, User};
use crate::poisoned;

/// Lookup and creation of user records.
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with `Conflict` if the email is taken.
    fn create(&self, input: CreateUser) -> Result<User, CoreError>;

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, CoreError>;

    /// Exact, case-sensitive email match.
    fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;
}

#[derive(Default)]
struct UserIndex {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<String, UserId>,
}

/// Process-local [`UserRepository`].
#[derive(Default)]
pub struct InMemoryUserRepo {
    inner: RwLock<UserIndex>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, input: CreateUser) -> Result<User, CoreError> {
        let mut index = self.inner.write().map_err(poisoned("user"))?;

        if index.id_by_email.contains_key(&input.email) {
            return Err(CoreError::Conflict("Email already exists".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        index.id_by_email.insert(user.email.clone(), user.id);
        index.by_id.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "Stored user");
        Ok(user)
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, CoreError> {
        let index = self.inner.read().map_err(poisoned("user"))?;
        Ok(index.by_id.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let index = self.inner.read().map_err(poisoned("user"))?;
        Ok(index
            .id_by_email
            .get(email)
            .and_then(|id| index.by_id.get(id))
            .cloned())
    }
}
