//! HTTP server and router

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{gate::require_login, middleware::resolve_identity, Authenticator, SessionBinder};
use crate::config::Config;
use crate::error::Result;
use crate::session::{middleware::session_layer, SessionStore, TokenSigner};
use crate::store::{CredentialStore, PostgresUserStore};
use crate::ui::Pages;

use super::routes;

/// Application state shared across handlers and middleware
pub struct AppState {
    pub sessions: SessionStore,
    pub signer: TokenSigner,
    pub authenticator: Authenticator,
    pub binder: SessionBinder,
    pub pages: Pages,
}

impl AppState {
    pub fn new(users: Arc<dyn CredentialStore>, signer: TokenSigner) -> Result<Self> {
        let sessions = SessionStore::new();
        Ok(Self {
            authenticator: Authenticator::new(Arc::clone(&users)),
            binder: SessionBinder::new(users, sessions.clone()),
            sessions,
            signer,
            pages: Pages::new()?,
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP server against the configured PostgreSQL credential store
pub async fn run_server(config: Config) -> Result<()> {
    let store = PostgresUserStore::connect(&config.database_url).await?;
    store.init_schema().await?;

    let state = Arc::new(AppState::new(
        Arc::new(store),
        TokenSigner::new(&config.session_secret),
    )?);

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/restricted", get(routes::restricted))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_login,
        ));

    Router::new()
        .route("/", get(routes::home))
        .route("/log-in", post(routes::log_in))
        .route("/log-out", get(routes::log_out))
        .route("/sign-up", get(routes::sign_up_form).post(routes::sign_up))
        .merge(protected)
        // Outer layers run first: session resolution, then identity
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            resolve_identity,
        ))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            session_layer,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
