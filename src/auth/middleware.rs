//! Identity resolution middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::server::SharedState;
use crate::auth::Identity;
use crate::error::Error;
use crate::session::SessionId;

/// The resolved identity for the current request; `None` while anonymous
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

/// Resolve the session's bound user on every request. Runs after the
/// session middleware; a store failure aborts the request.
pub async fn resolve_identity(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Error> {
    let identity = match req.extensions().get::<SessionId>() {
        Some(SessionId(sid)) => state.binder.resolve(sid).await?,
        None => None,
    };

    req.extensions_mut().insert(CurrentUser(identity));
    Ok(next.run(req).await)
}
