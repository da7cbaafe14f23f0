//! Password hashing
//!
//! bcrypt with a fixed work factor. Hashing and verification are slow by
//! design, so both run on the blocking thread pool instead of stalling the
//! async executor. Verification is bcrypt's constant-time comparison.

use crate::error::{Error, Result};

/// bcrypt work factor for new password hashes
const BCRYPT_COST: u32 = 10;

/// Salted one-way hash of a raw password
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| Error::Other(format!("hash task failed: {}", e)))?
        .map_err(Error::from)
}

/// Compare a candidate password against a stored hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::Other(format!("verify task failed: {}", e)))?
        .map_err(Error::from)
}
