//! CLI command implementations

use anyhow::Result;

use crate::api;
use crate::config::Config;
use crate::store::PostgresUserStore;

/// Start the HTTP server
pub async fn serve(
    host: &str,
    port: u16,
    database_url: String,
    session_secret: String,
) -> Result<()> {
    let config = Config {
        host: host.to_string(),
        port,
        database_url,
        session_secret,
    };

    api::run_server(config).await?;
    Ok(())
}

/// Bootstrap the users schema without starting the server
pub async fn init_db(database_url: &str) -> Result<()> {
    let store = PostgresUserStore::connect(database_url).await?;
    store.init_schema().await?;

    tracing::info!("users schema ready");
    Ok(())
}
