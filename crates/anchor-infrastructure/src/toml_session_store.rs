//! TOML file-backed `SessionStore`.

use std::path::PathBuf;
use std::sync::Arc;

use anchor_core::error::{AnchorError, Result};
use anchor_core::session::{Message, SessionSummary};
use anchor_core::store::{self, HistoryEntry, SessionSnapshot, SessionStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::storage::{AtomicTomlError, AtomicTomlFile};

/// On-disk layout of `store.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    disclaimer_accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_session: Option<SessionSnapshot>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

impl From<AtomicTomlError> for AnchorError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            AtomicTomlError::Lock(message) => AnchorError::data_access(message),
        }
    }
}

/// Keeps all three records in a single TOML document, overwritten in place.
///
/// File access runs on the blocking pool.
pub struct TomlSessionStore {
    file: Arc<AtomicTomlFile<StoreDocument>>,
}

impl TomlSessionStore {
    pub fn new(path: PathBuf) -> Self {
        tracing::debug!(path = %path.display(), "Using TOML session store");
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    async fn read<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(StoreDocument) -> R + Send + 'static,
        R: Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || file.load().map(f))
            .await
            .map_err(|e| AnchorError::internal(format!("Store task failed: {e}")))?
            .map_err(AnchorError::from)
    }

    async fn update<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut StoreDocument) -> R + Send + 'static,
        R: Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || file.update(|doc| Ok(f(doc))))
            .await
            .map_err(|e| AnchorError::internal(format!("Store task failed: {e}")))?
            .map_err(AnchorError::from)
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn has_accepted_disclaimer(&self) -> Result<bool> {
        self.read(|doc| doc.disclaimer_accepted).await
    }

    async fn accept_disclaimer(&self) -> Result<()> {
        self.update(|doc| doc.disclaimer_accepted = true).await
    }

    async fn save_snapshot(&self, messages: &[Message]) -> Result<()> {
        let snapshot = SessionSnapshot::now(messages.to_vec());
        self.update(move |doc| doc.current_session = Some(snapshot)).await
    }

    async fn load_snapshot(&self) -> Result<Option<SessionSnapshot>> {
        self.read(|doc| doc.current_session).await
    }

    async fn clear_snapshot(&self) -> Result<()> {
        self.update(|doc| doc.current_session = None).await
    }

    async fn add_to_history(&self, summary: SessionSummary) -> Result<HistoryEntry> {
        let entry = HistoryEntry::new(summary);
        let stored = entry.clone();
        self.update(move |doc| store::push_history(&mut doc.history, stored)).await?;
        Ok(entry)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.read(|doc| doc.history).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_core::store::HISTORY_LIMIT;
    use tempfile::TempDir;

    fn summary(count: usize) -> SessionSummary {
        SessionSummary {
            technique: "Grounding and Breathing".into(),
            takeaway: "Connecting to your senses helps.".into(),
            message_count: count,
        }
    }

    #[tokio::test]
    async fn test_fresh_store_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path().join("store.toml"));

        assert!(!store.has_accepted_disclaimer().await.unwrap());
        assert!(store.load_snapshot().await.unwrap().is_none());
        assert!(store.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disclaimer_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");

        TomlSessionStore::new(path.clone())
            .accept_disclaimer()
            .await
            .unwrap();

        let reopened = TomlSessionStore::new(path);
        assert!(reopened.has_accepted_disclaimer().await.unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path().join("store.toml"));
        let log = vec![
            Message::assistant("Hi, I'm Anchor."),
            Message::user("Deadlines \"everywhere\"\nand more"),
        ];

        store.save_snapshot(&log).await.unwrap();
        let snapshot = store.load_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.messages, log);

        store.clear_snapshot().await.unwrap();
        assert!(store.load_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_is_capped_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path().join("store.toml"));

        let mut last_id = String::new();
        for count in 1..=HISTORY_LIMIT + 2 {
            last_id = store.add_to_history(summary(count)).await.unwrap().id;
        }

        let history = store.history().await.unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].id, last_id);
        assert_eq!(history[0].summary.message_count, HISTORY_LIMIT + 2);
        assert_eq!(history[HISTORY_LIMIT - 1].summary.message_count, 3);
    }

    #[tokio::test]
    async fn test_records_do_not_clobber_each_other() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path().join("store.toml"));

        store.accept_disclaimer().await.unwrap();
        store.save_snapshot(&[Message::assistant("Hi")]).await.unwrap();
        store.add_to_history(summary(2)).await.unwrap();
        store.clear_snapshot().await.unwrap();

        assert!(store.has_accepted_disclaimer().await.unwrap());
        assert_eq!(store.history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_surfaces_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");
        std::fs::write(&path, "disclaimer_accepted = maybe").unwrap();

        let err = TomlSessionStore::new(path)
            .has_accepted_disclaimer()
            .await
            .unwrap_err();
        assert!(err.is_serialization());
    }
}
