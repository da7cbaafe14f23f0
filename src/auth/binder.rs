//! Binding identities to sessions

use std::sync::Arc;

use crate::auth::Identity;
use crate::error::Result;
use crate::session::SessionStore;
use crate::store::CredentialStore;

/// Connects login state to the session store: bind on login, resolve on
/// each request, unbind on logout.
#[derive(Clone)]
pub struct SessionBinder {
    users: Arc<dyn CredentialStore>,
    sessions: SessionStore,
}

impl SessionBinder {
    pub fn new(users: Arc<dyn CredentialStore>, sessions: SessionStore) -> Self {
        Self { users, sessions }
    }

    /// Record the authenticated user on the session
    pub async fn bind_on_login(&self, session_id: &str, identity: &Identity) {
        self.sessions.bind_user(session_id, &identity.id).await;
    }

    /// Resolve the session back to an identity. Unknown sessions, unbound
    /// sessions and dangling user ids all resolve to `None`; only store
    /// failures are errors.
    pub async fn resolve(&self, session_id: &str) -> Result<Option<Identity>> {
        let Some(session) = self.sessions.get(session_id).await else {
            return Ok(None);
        };
        let Some(user_id) = session.user_id else {
            return Ok(None);
        };

        let user = self.users.find_by_id(&user_id).await?;
        Ok(user.map(|u| Identity {
            id: u.id,
            username: u.username,
        }))
    }

    /// Log out: forget the session entirely so its token no longer
    /// resolves. A no-op when the session is already gone.
    pub async fn unbind(&self, session_id: &str) {
        self.sessions.delete(session_id).await;
    }
}
