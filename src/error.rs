//! Error types for Gatehouse

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::RegistrationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("{0}")]
    Other(String),
}

/// Generic request error handler: store and render failures become a bare
/// 500. Authentication failures never reach this path; they travel as flash
/// messages.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
