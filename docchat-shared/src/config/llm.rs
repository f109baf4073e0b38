//! # LLM Configuration
//!
//! Settings for the OpenAI-compatible upstream that answers `/ask`.

use serde::{Deserialize, Serialize};
use std::env;

use super::server::ConfigError;

/// Provider prefix accepted on model names (`openai:gpt-4o-mini`).
const PROVIDER_PREFIX: &str = "openai:";

/// Configuration for the chat-completions upstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub base_url: String,

    /// Model name sent with every completion request
    pub model: String,

    /// Bearer token; usually supplied through `OPENAI_API_KEY`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Optional system prompt placed before the conversation history
    pub system_prompt: Option<String>,

    /// Identifier of the conversation thread the assistant remembers
    pub thread_id: String,

    /// Number of past messages replayed to the upstream per request
    pub max_history_messages: usize,

    /// Upstream request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.0,
            system_prompt: None,
            thread_id: "1".to_string(),
            max_history_messages: 40,
            timeout_seconds: 60,
        }
    }
}

impl LlmConfig {
    /// Full URL of the completions endpoint.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Strips an optional `openai:` provider prefix from a model name.
    #[must_use]
    pub fn normalize_model(name: &str) -> String {
        name.trim()
            .strip_prefix(PROVIDER_PREFIX)
            .unwrap_or(name.trim())
            .to_string()
    }

    /// Fills fields still equal to `defaults` from `OPENAI_*` and
    /// `DOCCHAT_LLM_*` environment variables. A non-blank `OPENAI_API_KEY`
    /// always applies.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] when `DOCCHAT_LLM_TIMEOUT` is not a
    /// whole number of seconds.
    pub fn apply_env_overrides(&mut self, defaults: &Self) -> Result<(), ConfigError> {
        if self.model == defaults.model
            && let Ok(model) = env::var("OPENAI_MODEL")
        {
            self.model = Self::normalize_model(&model);
        }

        if let Ok(api_key) = env::var("OPENAI_API_KEY")
            && !api_key.trim().is_empty()
        {
            self.api_key = Some(api_key.trim().to_string());
        }

        if self.base_url == defaults.base_url
            && let Ok(base_url) = env::var("DOCCHAT_LLM_BASE_URL")
        {
            self.base_url = base_url;
        }

        if self.timeout_seconds == defaults.timeout_seconds
            && let Ok(timeout) = env::var("DOCCHAT_LLM_TIMEOUT")
        {
            self.timeout_seconds =
                timeout.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: "DOCCHAT_LLM_TIMEOUT",
                    reason: "must be a whole number of seconds".to_string(),
                })?;
        }

        Ok(())
    }

    /// Validate the LLM configuration
    ///
    /// # Errors
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(format!(
                "LLM base URL must start with http:// or https://: {}",
                self.base_url
            ));
        }

        if self.model.trim().is_empty() {
            errors.push("LLM model name must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            errors.push(format!(
                "LLM temperature must be between 0 and 2, got {}",
                self.temperature
            ));
        }

        if self.timeout_seconds == 0 {
            errors.push("LLM timeout must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("OPENAI_MODEL");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("DOCCHAT_LLM_BASE_URL");
            env::remove_var("DOCCHAT_LLM_TIMEOUT");
        }
    }

    #[test]
    fn defaults_target_openai() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.thread_id, "1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn completions_url_ignores_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:11434/v1/".into(),
            ..LlmConfig::default()
        };
        assert_eq!(
            config.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn provider_prefix_is_stripped() {
        assert_eq!(LlmConfig::normalize_model("openai:gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(LlmConfig::normalize_model(" llama3 "), "llama3");
    }

    #[test]
    #[serial]
    fn env_overrides_apply() {
        cleanup_env_vars();
        unsafe {
            env::set_var("OPENAI_MODEL", "openai:gpt-4.1");
            env::set_var("OPENAI_API_KEY", "sk-test");
            env::set_var("DOCCHAT_LLM_BASE_URL", "http://localhost:8000/v1");
            env::set_var("DOCCHAT_LLM_TIMEOUT", "5");
        }

        let mut config = LlmConfig::default();
        config.apply_env_overrides(&LlmConfig::default()).unwrap();

        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "http://localhost:8000/v1");
        assert_eq!(config.timeout_seconds, 5);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn blank_api_key_is_ignored() {
        cleanup_env_vars();
        unsafe {
            env::set_var("OPENAI_API_KEY", "  ");
        }
        let mut config = LlmConfig::default();
        config.apply_env_overrides(&LlmConfig::default()).unwrap();
        assert_eq!(config.api_key, None);
        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn env_leaves_non_default_fields_alone() {
        cleanup_env_vars();
        unsafe {
            env::set_var("OPENAI_MODEL", "env-model");
            env::set_var("DOCCHAT_LLM_BASE_URL", "http://env:2/v1");
            env::set_var("DOCCHAT_LLM_TIMEOUT", "5");
        }

        let mut config = LlmConfig {
            model: "file-model".into(),
            base_url: "http://file:1/v1".into(),
            timeout_seconds: 7,
            ..LlmConfig::default()
        };
        config.apply_env_overrides(&LlmConfig::default()).unwrap();

        assert_eq!(config.model, "file-model");
        assert_eq!(config.base_url, "http://file:1/v1");
        assert_eq!(config.timeout_seconds, 7);
        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn malformed_timeout_is_rejected() {
        cleanup_env_vars();
        unsafe {
            env::set_var("DOCCHAT_LLM_TIMEOUT", "soon");
        }
        let mut config = LlmConfig::default();
        let err = config
            .apply_env_overrides(&LlmConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: "DOCCHAT_LLM_TIMEOUT",
                ..
            }
        ));
        cleanup_env_vars();
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = LlmConfig {
            base_url: "ftp://nowhere".into(),
            model: " ".into(),
            temperature: 3.5,
            timeout_seconds: 0,
            ..LlmConfig::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = LlmConfig {
            api_key: Some("sk-secret".into()),
            ..LlmConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
