//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `SRS_ASSISTANT` prefix
//! and nested values are separated by double underscores. Every value has a
//! default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use srs_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Exports go to {}", config.export.output_dir.display());
//! ```

mod ai;
mod error;
mod export;
mod logging;
mod session;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::LoggingConfig;
pub use session::{SessionConfig, MAX_TURN_DELAY_MS};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Interview pacing and answer validation
    #[serde(default)]
    pub session: SessionConfig,

    /// Optional AI collaborator (Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Document export target
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `SRS_ASSISTANT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SRS_ASSISTANT__SESSION__TURN_DELAY_MS=0` -> `session.turn_delay_ms = 0`
    /// - `SRS_ASSISTANT__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SRS_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.session.validate()?;
        self.ai.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elicitation::ValidationPolicy;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "SRS_ASSISTANT__SESSION__TURN_DELAY_MS",
        "SRS_ASSISTANT__SESSION__VALIDATION_POLICY",
        "SRS_ASSISTANT__AI__ANTHROPIC_API_KEY",
        "SRS_ASSISTANT__AI__SUGGEST_REPHRASINGS",
        "SRS_ASSISTANT__EXPORT__OUTPUT_DIR",
        "SRS_ASSISTANT__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(config.session.turn_delay_ms, 500);
        assert_eq!(config.session.validation_policy, ValidationPolicy::Advisory);
        assert!(!config.ai.has_anthropic());
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SRS_ASSISTANT__SESSION__TURN_DELAY_MS", "0");
        env::set_var("SRS_ASSISTANT__SESSION__VALIDATION_POLICY", "enforced");
        env::set_var("SRS_ASSISTANT__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
        env::set_var("SRS_ASSISTANT__AI__SUGGEST_REPHRASINGS", "true");
        env::set_var("SRS_ASSISTANT__EXPORT__OUTPUT_DIR", "/tmp/srs");
        env::set_var("SRS_ASSISTANT__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.session.turn_delay_ms, 0);
        assert_eq!(config.session.validation_policy, ValidationPolicy::Enforced);
        assert!(config.ai.has_anthropic());
        assert!(config.ai.suggest_rephrasings);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/srs"));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let mut config = AppConfig::default();
        config.ai.suggest_rephrasings = true;

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        );
    }
}
