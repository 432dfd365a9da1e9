//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Optional AI collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key; the collaborator stays off without it
    pub anthropic_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Ask the model for a measurable rewrite of ambiguous statements
    #[serde(default)]
    pub suggest_rephrasings: bool,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.suggest_rephrasings && !self.has_anthropic() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_tokens: default_max_tokens(),
            suggest_rephrasings: false,
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_max_tokens() -> u32 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AiConfig {
        AiConfig {
            anthropic_api_key: Some(Secret::new("sk-ant-xxx".to_string())),
            ..AiConfig::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.max_tokens, 1000);
        assert!(!config.suggest_rephrasings);
        assert!(!config.has_anthropic());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 15,
            ..AiConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = AiConfig {
            anthropic_api_key: Some(Secret::new("  ".to_string())),
            ..AiConfig::default()
        };
        assert!(!config.has_anthropic());
    }

    #[test]
    fn test_defaults_validate_without_key() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rephrasing_requires_key() {
        let config = AiConfig {
            suggest_rephrasings: true,
            ..AiConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        );

        let config = AiConfig {
            suggest_rephrasings: true,
            ..with_key()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_empty_model_rejected() {
        let config = AiConfig {
            model: " ".to_string(),
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyModel));
    }

    #[test]
    fn test_debug_redacts_key() {
        assert!(!format!("{:?}", with_key()).contains("sk-ant-xxx"));
    }
}
