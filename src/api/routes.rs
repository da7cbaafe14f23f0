//! Route handlers

use axum::{
    extract::State,
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;

use super::server::SharedState;
use crate::auth::{AuthFailure, CurrentUser, PageCount};
use crate::error::{Error, Result};
use crate::session::SessionId;

/// Form body shared by login and sign-up
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Home page. Drains the session's flash messages for this render.
pub async fn home(
    State(state): State<SharedState>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Html<String>> {
    let messages = state.sessions.take_messages(&sid).await;
    Ok(Html(state.pages.home(current.0.as_ref(), &messages)?))
}

/// Consume the login form. Both outcomes redirect home; failures queue a
/// flash message instead of returning an error status.
pub async fn log_in(
    State(state): State<SharedState>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    match state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(identity) => {
            state.binder.bind_on_login(&sid, &identity).await;
            tracing::info!("user {} logged in", identity.username);
        }
        Err(failure @ (AuthFailure::UnknownUser | AuthFailure::BadPassword)) => {
            state.sessions.push_message(&sid, failure.to_string()).await;
        }
        Err(AuthFailure::Store(e)) => return Err(Error::Other(e)),
    }

    Ok(Redirect::to("/"))
}

/// Log out and return home. Unbinding an already-unbound session is a no-op.
pub async fn log_out(
    State(state): State<SharedState>,
    Extension(SessionId(sid)): Extension<SessionId>,
) -> Redirect {
    state.binder.unbind(&sid).await;
    Redirect::to("/")
}

/// Registration form
pub async fn sign_up_form(State(state): State<SharedState>) -> Result<Html<String>> {
    Ok(Html(state.pages.sign_up()?))
}

/// Consume the registration form and redirect home. Duplicate usernames are
/// not rejected.
pub async fn sign_up(
    State(state): State<SharedState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    let user_id = state
        .authenticator
        .register(&form.username, &form.password)
        .await?;

    tracing::info!("registered user {} ({})", form.username, user_id);
    Ok(Redirect::to("/"))
}

/// Members-only page; the access gate has already admitted the visitor and
/// bumped the counter.
pub async fn restricted(
    State(state): State<SharedState>,
    Extension(current): Extension<CurrentUser>,
    Extension(PageCount(count)): Extension<PageCount>,
) -> Result<Html<String>> {
    let username = current
        .0
        .as_ref()
        .map(|i| i.username.as_str())
        .unwrap_or("member");

    Ok(Html(state.pages.restricted(username, count)?))
}
