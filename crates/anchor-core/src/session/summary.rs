//! End-of-session summary.

use serde::{Deserialize, Serialize};

use super::message::{Message, MessageRole};

pub const PRACTICED_TECHNIQUE: &str = "Grounding and Breathing";
pub const TAKEAWAY: &str = "Connecting to your senses helps ground you in the present moment.";
pub const ENCOURAGEMENT: &str =
    "These techniques get easier with practice. Try to use them whenever you feel overwhelmed.";

/// What the user practiced during a session.
///
/// The technique and takeaway are fixed for the calming session; only the
/// exchange count is derived from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub technique: String,
    pub takeaway: String,
    /// Number of messages the user sent.
    pub message_count: usize,
}

impl SessionSummary {
    pub fn from_log(messages: &[Message]) -> Self {
        let message_count = messages
            .iter()
            .filter(|m| m.role() == MessageRole::User)
            .count();

        Self {
            technique: PRACTICED_TECHNIQUE.to_string(),
            takeaway: TAKEAWAY.to_string(),
            message_count,
        }
    }
}
