//! In-memory `SessionStore` for ephemeral runs.

use anchor_core::error::Result;
use anchor_core::session::{Message, SessionSummary};
use anchor_core::store::{self, HistoryEntry, SessionSnapshot, SessionStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps every record for the lifetime of the process only.
#[derive(Default)]
pub struct InMemorySessionStore {
    disclaimer_accepted: RwLock<bool>,
    snapshot: RwLock<Option<SessionSnapshot>>,
    history: RwLock<Vec<HistoryEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn has_accepted_disclaimer(&self) -> Result<bool> {
        Ok(*self.disclaimer_accepted.read().await)
    }

    async fn accept_disclaimer(&self) -> Result<()> {
        *self.disclaimer_accepted.write().await = true;
        Ok(())
    }

    async fn save_snapshot(&self, messages: &[Message]) -> Result<()> {
        *self.snapshot.write().await = Some(SessionSnapshot::now(messages.to_vec()));
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn clear_snapshot(&self) -> Result<()> {
        *self.snapshot.write().await = None;
        Ok(())
    }

    async fn add_to_history(&self, summary: SessionSummary) -> Result<HistoryEntry> {
        let entry = HistoryEntry::new(summary);
        store::push_history(&mut *self.history.write().await, entry.clone());
        Ok(entry)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_overwrites_in_place() {
        let store = InMemorySessionStore::new();

        store.save_snapshot(&[Message::assistant("Hi")]).await.unwrap();
        store
            .save_snapshot(&[Message::assistant("Hi"), Message::user("work")])
            .await
            .unwrap();

        let snapshot = store.load_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_disclaimer_defaults_to_unaccepted() {
        let store = InMemorySessionStore::new();
        assert!(!store.has_accepted_disclaimer().await.unwrap());

        store.accept_disclaimer().await.unwrap();
        assert!(store.has_accepted_disclaimer().await.unwrap());
    }
}
