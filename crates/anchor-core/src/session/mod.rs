//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//! - `state`: The four session states (`SessionState`)
//! - `summary`: End-of-session summary (`SessionSummary`)
//! - `controller`: The state machine driving a conversation (`SessionController`)
//!
//! # Usage
//!
//! ```ignore
//! use anchor_core::session::{SessionController, SendOutcome, SessionState};
//! use anchor_core::session::{Message, MessageRole};
//! ```

mod controller;
mod message;
mod state;
mod summary;

// Re-export public API
pub use controller::{SendOutcome, SessionController, SessionView};
pub use message::{Message, MessageRole};
pub use state::SessionState;
pub use summary::{ENCOURAGEMENT, PRACTICED_TECHNIQUE, SessionSummary, TAKEAWAY};
