//! RephrasingAdvisor - optional AI rewrite of ambiguous statements.
//!
//! When the ambiguity detector flags a statement, the advisor asks the
//! language model for a measurable version of it. The suggestion is shown to
//! the user as a hint only; it never enters the session log and any failure
//! simply means no hint.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::elicitation::AmbiguityFinding;
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::{AIProvider, CompletionRequest, PromptRole};

const SYSTEM_PROMPT: &str = "You are a requirements engineer. Rewrite the user's statement \
as one measurable, testable software requirement. Replace every subjective word with a \
concrete metric or observable condition. Reply with the rewritten requirement only.";

/// Longest suggestion passed on to the user, in characters.
const MAX_SUGGESTION_CHARS: usize = 500;

/// Asks an AI provider for measurable rewrites of ambiguous statements.
#[derive(Clone)]
pub struct RephrasingAdvisor {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl RephrasingAdvisor {
    pub fn new(provider: Arc<dyn AIProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Suggests a rewrite of `finding.source_text`.
    ///
    /// Returns `None` if the provider fails or answers with nothing.
    pub async fn suggest(&self, session_id: SessionId, finding: &AmbiguityFinding) -> Option<String> {
        let request = CompletionRequest::new(session_id)
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(PromptRole::User, Self::prompt(finding))
            .with_max_tokens(self.max_tokens)
            .with_temperature(0.2);

        match self.provider.complete(request).await {
            Ok(response) => {
                let suggestion = response.content.trim();
                if suggestion.is_empty() {
                    debug!(%session_id, "empty rephrasing suggestion");
                    return None;
                }
                Some(suggestion.chars().take(MAX_SUGGESTION_CHARS).collect())
            }
            Err(err) => {
                warn!(
                    %session_id,
                    code = %ErrorCode::AIProviderError,
                    provider = %self.provider.provider_info().name,
                    error = %err,
                    "rephrasing suggestion unavailable"
                );
                None
            }
        }
    }

    fn prompt(finding: &AmbiguityFinding) -> String {
        format!(
            "Statement: \"{}\"\nSubjective terms: {}",
            finding.source_text,
            finding.terms_joined()
        )
    }
}

impl std::fmt::Debug for RephrasingAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RephrasingAdvisor")
            .field("provider", &self.provider.provider_info())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::elicitation::scan_ambiguity;
    use crate::ports::AIError;

    fn finding(text: &str) -> AmbiguityFinding {
        AmbiguityFinding::from_match(text, scan_ambiguity(text).unwrap())
    }

    #[tokio::test]
    async fn returns_trimmed_suggestion() {
        let mock = MockAIProvider::new().with_response("  Pages load in under 2 seconds.\n");
        let advisor = RephrasingAdvisor::new(Arc::new(mock.clone()), 200);

        let suggestion = advisor
            .suggest(SessionId::new(), &finding("The app must be fast"))
            .await;

        assert_eq!(suggestion.as_deref(), Some("Pages load in under 2 seconds."));
    }

    #[tokio::test]
    async fn prompt_carries_statement_and_terms() {
        let mock = MockAIProvider::new();
        let advisor = RephrasingAdvisor::new(Arc::new(mock.clone()), 200);

        advisor
            .suggest(SessionId::new(), &finding("fast and reliable sync"))
            .await;

        let call = &mock.calls()[0];
        assert_eq!(call.max_tokens, Some(200));
        assert!(call.system_prompt.is_some());
        assert!(call.messages[0].content.contains("\"fast and reliable sync\""));
        assert!(call.messages[0].content.contains("fast, reliable"));
    }

    #[tokio::test]
    async fn provider_failure_yields_none() {
        let mock = MockAIProvider::new().with_error(AIError::unavailable("503"));
        let advisor = RephrasingAdvisor::new(Arc::new(mock), 200);

        assert!(advisor.suggest(SessionId::new(), &finding("easy")).await.is_none());
    }

    #[tokio::test]
    async fn blank_answer_yields_none() {
        let mock = MockAIProvider::new().with_response("   ");
        let advisor = RephrasingAdvisor::new(Arc::new(mock), 200);

        assert!(advisor.suggest(SessionId::new(), &finding("easy")).await.is_none());
    }
}
