//! CLI interface for Gatehouse

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(version = "0.1.0")]
#[command(about = "Username/password login with server-side sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Credential store connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Secret used to sign session tokens
        #[arg(long, env = "SESSION_SECRET")]
        session_secret: String,
    },

    /// Create the users table if it does not exist
    InitDb {
        /// Credential store connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}
