//! Interaction persistence.
//!
//! One record is written per successfully answered request; the service
//! has no read path over the store.

mod sqlite;

pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One persisted question/answer exchange.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Unique identifier, generated fresh per request
    pub request_id: Uuid,

    /// Creation time, UTC
    pub timestamp: DateTime<Utc>,

    /// Original user input; immutable once recorded
    pub question: Option<String>,

    /// Final text produced by the agent loop
    pub answer: String,

    /// Best-effort client address, "unknown" if unavailable
    pub source_ip: String,
}

impl Interaction {
    pub fn new(question: Option<String>, answer: String, source_ip: String) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            question,
            answer,
            source_ip,
        }
    }
}

/// Write-only store for interaction records.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Persist one interaction record.
    async fn record(&self, interaction: &Interaction) -> anyhow::Result<()>;
}

/// In-memory interaction store (non-persistent).
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<Vec<Interaction>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded interactions, oldest first.
    pub async fn recorded(&self) -> Vec<Interaction> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl InteractionStore for InMemoryStore {
    async fn record(&self, interaction: &Interaction) -> anyhow::Result<()> {
        self.records.write().await.push(interaction.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_are_appended_in_order() {
        let store = InMemoryStore::new();
        store
            .record(&Interaction::new(
                Some("first".to_string()),
                "a".to_string(),
                "unknown".to_string(),
            ))
            .await
            .unwrap();
        store
            .record(&Interaction::new(
                None,
                "b".to_string(),
                "10.0.0.1".to_string(),
            ))
            .await
            .unwrap();

        let records = store.recorded().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question.as_deref(), Some("first"));
        assert_eq!(records[1].question, None);
        assert_ne!(records[0].request_id, records[1].request_id);
    }
}
