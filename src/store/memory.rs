//! In-memory credential store for tests

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::user::{CredentialStore, User};
use crate::error::Result;

/// Credential store holding records in insertion order, so "first match"
/// means the oldest record with that username.
#[derive(Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a record, simulating an out-of-band deletion.
    pub async fn remove(&self, id: &str) {
        self.users.write().await.retain(|u| u.id != id);
    }
}

#[async_trait]
impl CredentialStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        self.users.write().await.push(user);
        Ok(())
    }
}
