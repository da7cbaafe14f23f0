//! Credential verification and sign-up

use std::sync::Arc;

use thiserror::Error;

use crate::auth::password;
use crate::store::{CredentialStore, User};

/// The authenticated user's id and username. The only user data that leaves
/// the credential store.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

/// Why a login attempt was rejected. `UnknownUser` and `BadPassword` render
/// as flash messages; `Store` is fatal to the request.
#[derive(Error, Debug)]
pub enum AuthFailure {
    #[error("Incorrect username")]
    UnknownUser,

    #[error("Incorrect password")]
    BadPassword,

    #[error("Credential store error: {0}")]
    Store(String),
}

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Could not hash password: {0}")]
    Hash(String),

    #[error("Could not save user: {0}")]
    Store(String),
}

/// Checks raw credentials against stored records and handles sign-up
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn CredentialStore>) -> Self {
        Self { users }
    }

    /// Verify raw credentials against the stored hash. Read-only; the first
    /// user with the given username is the one checked.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthFailure> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| AuthFailure::Store(e.to_string()))?
            .ok_or(AuthFailure::UnknownUser)?;

        let matches = password::verify_password(password, &user.password_hash)
            .await
            .map_err(|e| AuthFailure::Store(e.to_string()))?;

        if !matches {
            return Err(AuthFailure::BadPassword);
        }

        Ok(Identity {
            id: user.id,
            username: user.username,
        })
    }

    /// Sign-up flow: hash the password and persist a new user. Usernames
    /// are not checked for duplicates and passwords carry no strength rule.
    pub async fn register(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<String, RegistrationError> {
        let password_hash = password::hash_password(raw_password)
            .await
            .map_err(|e| RegistrationError::Hash(e.to_string()))?;

        let user = User::new(username.to_string(), password_hash);
        let id = user.id.clone();

        self.users
            .insert(user)
            .await
            .map_err(|e| RegistrationError::Store(e.to_string()))?;

        Ok(id)
    }
}
