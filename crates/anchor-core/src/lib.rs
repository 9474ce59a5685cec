pub mod completion;
pub mod config;
pub mod content;
pub mod error;
pub mod prompt;
pub mod safety;
pub mod session;
pub mod store;

// Re-export common error type
pub use error::AnchorError;
