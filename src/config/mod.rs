//! Runtime configuration
//!
//! Assembled by the CLI layer from arguments and environment variables.
//! Both secrets are required opaque strings; clap refuses to start the
//! server without them.

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Credential store connection string (`DATABASE_URL`)
    pub database_url: String,

    /// Secret used to sign session tokens (`SESSION_SECRET`)
    pub session_secret: String,
}
