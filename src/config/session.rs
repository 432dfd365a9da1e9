//! Interview session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::elicitation::ValidationPolicy;

/// Longest accepted pause between a user message and the reply.
pub const MAX_TURN_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Pause before the assistant replies; 0 disables it
    #[serde(default = "default_turn_delay")]
    pub turn_delay_ms: u64,

    /// Whether stage answer rules block capture
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

impl SessionConfig {
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.turn_delay_ms > MAX_TURN_DELAY_MS {
            return Err(ValidationError::TurnDelayTooLong {
                max_ms: MAX_TURN_DELAY_MS,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            turn_delay_ms: default_turn_delay(),
            validation_policy: ValidationPolicy::default(),
        }
    }
}

fn default_turn_delay() -> u64 {
    500
}
