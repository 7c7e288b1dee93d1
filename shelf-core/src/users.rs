//! User registry. Usernames are not unique and roles are not checked.

use std::collections::BTreeMap;

use crate::types::{User, UserId};

#[derive(Debug, Clone)]
pub struct UserRegistry {
    users: BTreeMap<UserId, User>,
    next_id: u32,
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRegistry {
    pub fn new() -> Self {
        Self { users: BTreeMap::new(), next_id: 1 }
    }

    /// Register a user under the next id. Never fails.
    pub fn add(&mut self, username: impl Into<String>, role: impl Into<String>) -> User {
        let id = UserId(self.next_id);
        self.next_id += 1;
        let user = User { id, username: username.into(), role: role.into() };
        tracing::debug!(user = %id, username = %user.username, role = %user.role, "user added");
        self.users.insert(id, user.clone());
        user
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn list(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
