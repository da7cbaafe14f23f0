//! User records and the credential store seam

use async_trait::async_trait;

use crate::error::Result;

/// A stored user record. The password hash stays inside the store and auth
/// layers; everything else sees an `Identity`.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Username for login
    pub username: String,
    /// Salted one-way hash of the password
    pub password_hash: String,
}

impl User {
    /// Create a new user record with a fresh id
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            password_hash,
        }
    }
}

/// Storage seam for user records. Object-safe so handlers hold a shared
/// trait object and tests substitute the in-memory store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// First record with the given username, if any. Usernames are not
    /// unique; callers get the oldest match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Record with the given id, if any
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Persist a new record
    async fn insert(&self, user: User) -> Result<()>;
}
