//! Session store trait and persisted records.
//!
//! The store keeps three logical records: the disclaimer flag, a snapshot of
//! the conversation in progress, and a short list of completed sessions.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::session::{Message, SessionSummary};

/// Maximum number of completed sessions kept in history.
pub const HISTORY_LIMIT: usize = 5;

/// The conversation in progress, saved so it is not lost mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// RFC 3339 timestamp.
    pub saved_at: String,
    pub messages: Vec<Message>,
}

impl SessionSnapshot {
    pub fn now(messages: Vec<Message>) -> Self {
        Self {
            saved_at: Utc::now().to_rfc3339(),
            messages,
        }
    }
}

/// One completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// RFC 3339 timestamp.
    pub completed_at: String,
    pub summary: SessionSummary,
}

impl HistoryEntry {
    pub fn new(summary: SessionSummary) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            completed_at: Utc::now().to_rfc3339(),
            summary,
        }
    }
}

/// Inserts `entry` at the front of `history` and trims it to [`HISTORY_LIMIT`].
pub fn push_history(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.insert(0, entry);
    history.truncate(HISTORY_LIMIT);
}

/// Persistence for the records that outlive a single session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn has_accepted_disclaimer(&self) -> Result<bool>;

    async fn accept_disclaimer(&self) -> Result<()>;

    /// Overwrites the current-session snapshot.
    async fn save_snapshot(&self, messages: &[Message]) -> Result<()>;

    async fn load_snapshot(&self) -> Result<Option<SessionSnapshot>>;

    async fn clear_snapshot(&self) -> Result<()>;

    /// Records a completed session, newest first, keeping at most [`HISTORY_LIMIT`].
    async fn add_to_history(&self, summary: SessionSummary) -> Result<HistoryEntry>;

    /// Completed sessions, newest first.
    async fn history(&self) -> Result<Vec<HistoryEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(count: usize) -> SessionSummary {
        SessionSummary {
            technique: "Grounding and Breathing".into(),
            takeaway: "Breathe".into(),
            message_count: count,
        }
    }

    #[test]
    fn test_push_history_is_newest_first_and_capped() {
        let mut history = Vec::new();
        for count in 0..7 {
            push_history(&mut history, HistoryEntry::new(summary(count)));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        let counts: Vec<usize> = history.iter().map(|e| e.summary.message_count).collect();
        assert_eq!(counts, vec![6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_history_entries_get_distinct_ids() {
        let a = HistoryEntry::new(summary(1));
        let b = HistoryEntry::new(summary(1));
        assert_ne!(a.id, b.id);
        assert!(chrono::DateTime::parse_from_rfc3339(&a.completed_at).is_ok());
    }

    #[test]
    fn test_history_entry_nests_summary() {
        let entry = HistoryEntry::new(summary(3));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["summary"]["message_count"], 3);
        assert_eq!(json["summary"]["technique"], "Grounding and Breathing");
    }
}
