//! Language-model backends for the Anchor companion.

pub mod config;
pub mod openai_completion_client;

pub use config::{EnvSource, ProcessEnv, resolve_completion_settings};
pub use openai_completion_client::OpenAICompletionClient;
