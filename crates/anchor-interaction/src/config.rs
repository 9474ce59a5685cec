//! Completion settings resolution.
//!
//! Priority: `secret.json` > environment variables (`OPENAI_API_KEY`,
//! `OPENAI_MODEL_NAME`, `OPENAI_BASE_URL`). A model passed explicitly wins
//! over both.

use anchor_core::config::{CompletionSettings, OpenAIConfig};
use anchor_core::error::{AnchorError, Result};
use anchor_infrastructure::storage::SecretStorage;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL_NAME";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Builds the completion settings, failing fast when no API key is configured.
pub fn resolve_completion_settings(
    secrets: &SecretStorage,
    env: &dyn EnvSource,
    model_override: Option<&str>,
) -> Result<CompletionSettings> {
    let from_file = secrets
        .load_or_default()
        .map_err(|e| AnchorError::config(format!("{}: {}", secrets.path().display(), e)))?
        .openai
        .filter(|c| !c.api_key.trim().is_empty());

    let openai = match from_file {
        Some(config) => {
            tracing::debug!(path = %secrets.path().display(), "Using API key from secret file");
            config
        }
        None => OpenAIConfig {
            api_key: non_empty(env.var(API_KEY_VAR)).ok_or_else(|| {
                AnchorError::config(format!(
                    "{} not found in {} or environment variables",
                    API_KEY_VAR,
                    secrets.path().display()
                ))
            })?,
            model_name: non_empty(env.var(MODEL_VAR)),
            base_url: non_empty(env.var(BASE_URL_VAR)),
        },
    };

    let mut settings = CompletionSettings::new(openai.api_key);
    if let Some(model) = model_override.map(str::to_string).or(openai.model_name) {
        settings = settings.with_model(model);
    }
    if let Some(base_url) = openai.base_url {
        settings = settings.with_base_url(base_url);
    }

    Ok(settings)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
