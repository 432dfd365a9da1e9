//! AI Provider Adapters.
//!
//! - `AnthropicProvider` - Anthropic Messages API
//! - `MockAIProvider` - Configurable mock for testing

mod anthropic_provider;
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAIProvider, MockResponse};

use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AiConfig;
use crate::ports::AIProvider;

/// Builds the configured provider, or `None` when the collaborator is off.
///
/// A missing key or a client that fails to build only disables the
/// feature; it is never an error for the caller.
pub fn build_provider(config: &AiConfig) -> Option<Arc<dyn AIProvider>> {
    if !config.suggest_rephrasings {
        return None;
    }
    let Some(api_key) = config.anthropic_api_key.as_ref().filter(|_| config.has_anthropic()) else {
        warn!("rephrasing suggestions enabled but no Anthropic API key is set");
        return None;
    };

    let anthropic = AnthropicConfig::new(api_key.expose_secret().clone())
        .with_model(config.model.clone())
        .with_base_url(config.base_url.clone())
        .with_timeout(config.timeout())
        .with_max_retries(config.max_retries)
        .with_max_tokens(config.max_tokens);

    match AnthropicProvider::new(anthropic) {
        Ok(provider) => {
            info!(model = %config.model, "AI rephrasing enabled");
            Some(Arc::new(provider))
        }
        Err(err) => {
            warn!(error = %err, "AI provider unavailable");
            None
        }
    }
}
