//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("AI model name cannot be empty")]
    EmptyModel,

    #[error("AI max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Turn delay exceeds maximum allowed ({max_ms} ms)")]
    TurnDelayTooLong { max_ms: u64 },

    #[error("Export output directory cannot be empty")]
    EmptyOutputDir,

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}
