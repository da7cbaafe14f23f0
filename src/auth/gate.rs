//! Access gate for protected routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::server::SharedState;
use crate::auth::{CurrentUser, Identity};
use crate::session::SessionId;

/// Message queued when an anonymous visitor hits a protected route
pub const DENIED_MESSAGE: &str = "You can't access that page before logon";

/// Outcome of the gate check
#[derive(Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny { reason: &'static str },
}

/// Deny-by-default: only a resolved identity passes
pub fn check(identity: Option<&Identity>) -> Access {
    match identity {
        Some(_) => Access::Allow,
        None => Access::Deny {
            reason: DENIED_MESSAGE,
        },
    }
}

/// Per-session page views, made available to gated handlers
#[derive(Debug, Clone, Copy)]
pub struct PageCount(pub u64);

/// Route middleware guarding protected pages. Denied visitors are sent home
/// with the queued message; allowed visits bump the page counter.
pub async fn require_login(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = req.extensions().get::<SessionId>().cloned();
    let current = req
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .unwrap_or(CurrentUser(None));

    match check(current.0.as_ref()) {
        Access::Allow => {
            if let Some(SessionId(sid)) = &session_id {
                let count = state.sessions.increment_page_count(sid).await.unwrap_or(1);
                req.extensions_mut().insert(PageCount(count));
            }
            next.run(req).await
        }
        Access::Deny { reason } => {
            if let Some(SessionId(sid)) = &session_id {
                state.sessions.push_message(sid, reason).await;
            }
            Redirect::to("/").into_response()
        }
    }
}
