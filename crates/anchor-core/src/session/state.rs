//! Session state types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the conversation currently stands.
///
/// ```text
/// Idle ──start──▶ Active ──end──▶ SummaryShown ──start new──▶ Active
///                   │
///                   └─unsafe input─▶ SafetyDiverted ──exit──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No conversation yet (home screen).
    #[default]
    Idle,
    /// A conversation is running.
    Active,
    /// A risk phrase was detected; the crisis screen is shown.
    SafetyDiverted,
    /// The conversation was ended and its summary is shown.
    SummaryShown,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::SafetyDiverted => "in safety mode",
            SessionState::SummaryShown => "showing its summary",
        };
        f.write_str(name)
    }
}
