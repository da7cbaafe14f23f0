//! Server-side session state

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Minutes of inactivity before a session is forgotten
const SESSION_IDLE_MINUTES: i64 = 30;

/// Per-client state keyed by the session id carried in the cookie token
#[derive(Debug, Clone)]
pub struct Session {
    /// Store-assigned session id
    pub id: String,
    /// Bound user id; `None` while anonymous
    pub user_id: Option<String>,
    /// One-shot messages, drained on the next render
    pub messages: Vec<String>,
    /// Page views counted by the access gate
    pub page_count: u64,
    /// When the session was created
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// When the session was last accessed
    pub last_accessed: chrono::DateTime<chrono::Utc>,
}

impl Session {
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            messages: Vec::new(),
            page_count: 0,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Check if the session passed the inactivity limit
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now();
        now.signed_duration_since(self.last_accessed).num_minutes() > SESSION_IDLE_MINUTES
    }

    /// Update last accessed time
    pub fn touch(&mut self) {
        self.last_accessed = chrono::Utc::now();
    }
}

/// In-memory session store. Cloning shares the underlying map.
#[derive(Default, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh anonymous session
    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    /// Get a session by id, expiring it on read if it went idle too long
    pub async fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(id) {
            if session.is_expired() {
                sessions.remove(id);
                return None;
            }
            session.touch();
            return Some(session.clone());
        }
        None
    }

    /// Delete a session. Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    /// Record the logged-in user on the session
    pub async fn bind_user(&self, id: &str, user_id: &str) {
        self.with_session(id, |s| s.user_id = Some(user_id.to_string()))
            .await;
    }

    /// Queue a one-shot message for the next render
    pub async fn push_message(&self, id: &str, message: impl Into<String>) {
        let message = message.into();
        self.with_session(id, |s| s.messages.push(message)).await;
    }

    /// Drain the queued messages; the queue is empty afterwards
    pub async fn take_messages(&self, id: &str) -> Vec<String> {
        self.with_session(id, |s| std::mem::take(&mut s.messages))
            .await
            .unwrap_or_default()
    }

    /// Bump the page-view counter and return the new value
    pub async fn increment_page_count(&self, id: &str) -> Option<u64> {
        self.with_session(id, |s| {
            s.page_count += 1;
            s.page_count
        })
        .await
    }

    /// Drop all expired sessions
    pub async fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired());
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn with_session<F, T>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let store = SessionStore::new();
        let session = store.create().await;

        let retrieved = store.get(&session.id).await;
        assert!(retrieved.is_some());
        let retrieved = retrieved.unwrap();
        assert!(retrieved.user_id.is_none());
        assert_eq!(retrieved.page_count, 0);
    }

    #[tokio::test]
    async fn test_bind_user() {
        let store = SessionStore::new();
        let session = store.create().await;

        store.bind_user(&session.id, "user-1").await;
        let retrieved = store.get(&session.id).await.unwrap();
        assert_eq!(retrieved.user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_delete_session_is_idempotent() {
        let store = SessionStore::new();
        let session = store.create().await;

        store.delete(&session.id).await;
        assert!(store.get(&session.id).await.is_none());

        // Deleting again is a no-op
        store.delete(&session.id).await;
        assert!(store.get(&session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_messages_are_drained_once() {
        let store = SessionStore::new();
        let session = store.create().await;

        store.push_message(&session.id, "first").await;
        store.push_message(&session.id, "second").await;

        let messages = store.take_messages(&session.id).await;
        assert_eq!(messages, vec!["first".to_string(), "second".to_string()]);

        assert!(store.take_messages(&session.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_messages_for_unknown_session_are_empty() {
        let store = SessionStore::new();
        assert!(store.take_messages("nope").await.is_empty());
    }

    #[tokio::test]
    async fn test_page_count_starts_at_one() {
        let store = SessionStore::new();
        let session = store.create().await;

        assert_eq!(store.increment_page_count(&session.id).await, Some(1));
        assert_eq!(store.increment_page_count(&session.id).await, Some(2));
    }

    #[tokio::test]
    async fn test_session_expiration() {
        let store = SessionStore::new();
        let session = store.create().await;

        // Manually expire the session for testing
        {
            let mut sessions = store.sessions.write().await;
            if let Some(s) = sessions.get_mut(&session.id) {
                s.last_accessed =
                    chrono::Utc::now() - chrono::Duration::minutes(SESSION_IDLE_MINUTES + 1);
            }
        }

        assert!(store.get(&session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = SessionStore::new();
        let stale = store.create().await;
        let fresh = store.create().await;

        {
            let mut sessions = store.sessions.write().await;
            if let Some(s) = sessions.get_mut(&stale.id) {
                s.last_accessed =
                    chrono::Utc::now() - chrono::Duration::minutes(SESSION_IDLE_MINUTES + 1);
            }
        }

        store.cleanup_expired().await;
        assert_eq!(store.session_count().await, 1);
        assert!(store.get(&fresh.id).await.is_some());
    }
}
