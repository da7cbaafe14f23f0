//! Session resolution middleware
//!
//! Runs on every request: verifies the cookie token and loads the matching
//! session, or creates a fresh one when the cookie is missing, tampered, or
//! points at a session the store no longer knows (expired or logged out).

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};

use crate::api::server::SharedState;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "gatehouse_session";

/// Session id for the current request, stashed in request extensions
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

/// Resolve or create the session, then set the cookie on the way out when a
/// new session was issued.
pub async fn session_layer(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = token_from_headers(req.headers())
        .and_then(|token| state.signer.verify(token));

    let (session, is_new) = match existing {
        Some(sid) => match state.sessions.get(&sid).await {
            Some(session) => (session, false),
            None => (state.sessions.create().await, true),
        },
        None => (state.sessions.create().await, true),
    };

    req.extensions_mut().insert(SessionId(session.id.clone()));

    let mut response = next.run(req).await;

    if is_new {
        match state.signer.sign(&session.id) {
            Ok(token) => {
                let cookie = format!(
                    "{}={}; Path=/; HttpOnly; SameSite=Lax",
                    SESSION_COOKIE, token
                );
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
            }
            Err(e) => tracing::error!("failed to sign session token: {}", e),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_token_from_headers() {
        let headers = headers_with_cookie("gatehouse_session=abc123");
        assert_eq!(token_from_headers(&headers), Some("abc123"));
    }

    #[test]
    fn test_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; gatehouse_session=abc123; lang=en");
        assert_eq!(token_from_headers(&headers), Some("abc123"));
    }

    #[test]
    fn test_no_cookie_header() {
        assert!(token_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_unrelated_cookies_only() {
        let headers = headers_with_cookie("theme=dark");
        assert!(token_from_headers(&headers).is_none());
    }
}
