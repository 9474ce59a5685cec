//! Configuration types.
//!
//! `SecretConfig` mirrors `secret.json`; `CompletionSettings` holds the
//! resolved parameters of the completion call.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAIConfig>,
}

/// OpenAI API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Override for the chat-completions endpoint (proxies, compatible servers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Resolved parameters for every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout: Duration,
}

impl CompletionSettings {
    /// Settings with the default model, limits and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calming_session_contract() {
        let settings = CompletionSettings::new("sk-test");
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.max_tokens, 150);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_secret_config_parses_minimal_json() {
        let config: SecretConfig =
            serde_json::from_str(r#"{"openai":{"api_key":"sk-abc"}}"#).unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key, "sk-abc");
        assert!(openai.model_name.is_none());
        assert!(openai.base_url.is_none());
    }

    #[test]
    fn test_secret_config_allows_missing_section() {
        let config: SecretConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SecretConfig::default());
    }
}
