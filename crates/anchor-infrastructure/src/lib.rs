pub mod memory_session_store;
pub mod paths;
pub mod storage;
pub mod toml_session_store;

pub use crate::memory_session_store::InMemorySessionStore;
pub use crate::paths::AnchorPaths;
pub use crate::toml_session_store::TomlSessionStore;
