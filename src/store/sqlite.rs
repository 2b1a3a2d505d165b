//! SQLite-backed interaction store.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use super::{Interaction, InteractionStore};

/// Durable interaction store on a local SQLite file.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS interactions (
                request_id TEXT PRIMARY KEY,
                timestamp  TEXT NOT NULL,
                question   TEXT,
                answer     TEXT NOT NULL,
                source_ip  TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl InteractionStore for SqliteStore {
    async fn record(&self, interaction: &Interaction) -> anyhow::Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO interactions (request_id, timestamp, question, answer, source_ip)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                interaction.request_id.to_string(),
                interaction.timestamp.to_rfc3339(),
                interaction.question,
                interaction.answer,
                interaction.source_ip,
            ],
        )?;
        Ok(())
    }
}
