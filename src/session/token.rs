//! Signed session tokens
//!
//! The cookie value is a signed wrapper around the session id. The signing
//! secret comes from configuration; anything that fails signature or expiry
//! checks resolves to no session.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Days before a signed token (not the session itself) expires
const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Session id
    sid: String,
    /// Issued at
    iat: i64,
    /// Expiration time
    exp: i64,
}

/// Signs session ids into cookie tokens and verifies them back
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Wrap a session id in a signed token
    pub fn sign(&self, session_id: &str) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sid: session_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_DAYS * 24 * 3600,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Session id carried by the token, or `None` for anything invalid
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| data.claims.sid)
    }
}
