//! PostgreSQL-backed credential store

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};

use super::user::{CredentialStore, User};
use crate::error::Result;

/// Credential store backed by a PostgreSQL `users` table.
pub struct PostgresUserStore {
    client: Client,
}

impl PostgresUserStore {
    /// Connect using a standard connection string and spawn the connection
    /// driver task.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    /// Create the users table if it does not exist.
    ///
    /// `username` carries no uniqueness constraint: duplicate sign-ups are
    /// allowed and lookups take the oldest match.
    pub async fn init_schema(&self) -> Result<()> {
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    username TEXT NOT NULL,
                    password_hash TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )",
                &[],
            )
            .await?;

        tracing::debug!("users schema ready");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PostgresUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, username, password_hash FROM users
                 WHERE username = $1 ORDER BY created_at LIMIT 1",
                &[&username],
            )
            .await?;

        Ok(row.map(|r| User {
            id: r.get(0),
            username: r.get(1),
            password_hash: r.get(2),
        }))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, username, password_hash FROM users WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.map(|r| User {
            id: r.get(0),
            username: r.get(1),
            password_hash: r.get(2),
        }))
    }

    async fn insert(&self, user: User) -> Result<()> {
        self.client
            .execute(
                "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3)",
                &[&user.id, &user.username, &user.password_hash],
            )
            .await?;

        Ok(())
    }
}
