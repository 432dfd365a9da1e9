//! ElicitationOrchestrator - drives the one live interview.
//!
//! The orchestrator owns the session and applies each turn through the
//! domain reducer. Messages are published to subscribers as they are
//! appended: the user's own message right away, the assistant's replies
//! after the configured turn delay.

use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::RephrasingAdvisor;
use crate::config::SessionConfig;
use crate::domain::elicitation::{
    ElicitationSession, Message, SessionSnapshot, SessionStats, Stage, TurnOutcome, TurnResult,
    ValidationPolicy,
};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Default capacity of the event channel.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Events published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A message was appended to the session log.
    Message(Message),
    /// AI rewrite of an ambiguous statement. Not part of the log.
    Suggestion { original: String, suggestion: String },
    /// The session was discarded.
    Reset,
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub turn_delay: Duration,
    pub validation_policy: ValidationPolicy,
    pub channel_capacity: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            turn_delay: Duration::from_millis(500),
            validation_policy: ValidationPolicy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl From<&SessionConfig> for OrchestratorConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            turn_delay: config.turn_delay(),
            validation_policy: config.validation_policy,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Command to start an interview.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub project_name: String,
}

#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session_id: SessionId,
    pub project_name: String,
    pub stage: Stage,
    /// Opening messages, already published.
    pub intro: Vec<Message>,
}

#[derive(Debug, Clone, Error)]
pub enum CreateSessionError {
    #[error("A project is already in progress; reset it first")]
    AlreadyStarted,

    #[error("Invalid project name: {0}")]
    InvalidProjectName(String),
}

impl CreateSessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CreateSessionError::AlreadyStarted => ErrorCode::InvalidStateTransition,
            CreateSessionError::InvalidProjectName(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<DomainError> for CreateSessionError {
    fn from(err: DomainError) -> Self {
        CreateSessionError::InvalidProjectName(err.message)
    }
}

#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    pub outcome: TurnOutcome,
    /// Rephrasing hint for an ambiguous turn, when an advisor is configured.
    pub suggestion: Option<String>,
}

/// Owns the current session and publishes what each turn appends.
pub struct ElicitationOrchestrator {
    session: ElicitationSession,
    config: OrchestratorConfig,
    advisor: Option<RephrasingAdvisor>,
    events: broadcast::Sender<SessionEvent>,
}

impl ElicitationOrchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        let (events, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            session: ElicitationSession::idle(config.validation_policy),
            config,
            advisor: None,
            events,
        }
    }

    pub fn with_advisor(mut self, advisor: RephrasingAdvisor) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Starts the interview and publishes the introduction.
    ///
    /// # Errors
    ///
    /// - `AlreadyStarted` if a project is in progress
    /// - `InvalidProjectName` if the name is blank or too long
    pub fn create_session(
        &mut self,
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, CreateSessionError> {
        if self.session.is_started() {
            return Err(CreateSessionError::AlreadyStarted);
        }

        let session = ElicitationSession::create(&cmd.project_name, self.config.validation_policy)?;
        let intro = session.messages().to_vec();
        let project_name = session
            .project_name()
            .map(|name| name.to_string())
            .unwrap_or_default();

        info!(
            session_id = %session.id(),
            project = %project_name,
            "elicitation session started"
        );

        let result = CreateSessionResult {
            session_id: *session.id(),
            project_name,
            stage: session.stage(),
            intro: intro.clone(),
        };
        self.session = session;
        for message in intro {
            self.publish(SessionEvent::Message(message));
        }

        Ok(result)
    }

    /// Applies one user turn.
    ///
    /// Rejected turns publish nothing. When the turn was flagged as
    /// ambiguous and an advisor is configured, its suggestion is published
    /// after the alert.
    pub async fn submit_turn(&mut self, text: &str) -> SubmitTurnResult {
        let session = std::mem::take(&mut self.session);
        let (session, outcome) = session.submit_turn(text);
        self.session = session;

        if outcome.is_rejected() {
            debug!(result = ?outcome.result, "turn rejected");
            return SubmitTurnResult {
                outcome,
                suggestion: None,
            };
        }

        let mut emitted = outcome.emitted.iter();
        if let Some(user_message) = emitted.next() {
            self.publish(SessionEvent::Message(user_message.clone()));
        }
        if outcome.emitted.len() > 1 && !self.config.turn_delay.is_zero() {
            tokio::time::sleep(self.config.turn_delay).await;
        }
        for message in emitted {
            self.publish(SessionEvent::Message(message.clone()));
        }

        let suggestion = match (&outcome.result, &self.advisor) {
            (TurnResult::AmbiguityFlagged(finding), Some(advisor)) => {
                let suggestion = advisor.suggest(*self.session.id(), finding).await;
                if let Some(text) = &suggestion {
                    self.publish(SessionEvent::Suggestion {
                        original: finding.source_text.clone(),
                        suggestion: text.clone(),
                    });
                }
                suggestion
            }
            _ => None,
        };

        SubmitTurnResult {
            outcome,
            suggestion,
        }
    }

    /// Discards the current interview.
    pub fn reset_session(&mut self) {
        let session = std::mem::take(&mut self.session);
        info!(
            session_id = %session.id(),
            requirements = session.requirement_count(),
            "elicitation session reset"
        );
        self.session = session.reset();
        self.publish(SessionEvent::Reset);
    }

    pub fn session(&self) -> &ElicitationSession {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    pub fn stats(&self) -> SessionStats {
        self.session.stats()
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.snapshot()
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::elicitation::{AlertKind, RejectReason};
    use crate::ports::AIError;
    use std::sync::Arc;
    use tokio::sync::broadcast::error::TryRecvError;

    fn instant() -> OrchestratorConfig {
        OrchestratorConfig {
            turn_delay: Duration::ZERO,
            ..OrchestratorConfig::default()
        }
    }

    fn started(config: OrchestratorConfig) -> ElicitationOrchestrator {
        let mut orchestrator = ElicitationOrchestrator::new(config);
        orchestrator
            .create_session(CreateSessionCommand {
                project_name: "Acme".to_string(),
            })
            .unwrap();
        orchestrator
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return events,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
    }

    mod create {
        use super::*;

        #[test]
        fn publishes_intro_and_moves_to_features() {
            let mut orchestrator = ElicitationOrchestrator::new(instant());
            let mut rx = orchestrator.subscribe();

            let result = orchestrator
                .create_session(CreateSessionCommand {
                    project_name: "  Acme  ".to_string(),
                })
                .unwrap();

            assert_eq!(result.project_name, "Acme");
            assert_eq!(result.stage, Stage::Features);
            assert!(!result.intro.is_empty());
            assert_eq!(drain(&mut rx).len(), result.intro.len());
        }

        #[test]
        fn blank_name_is_rejected() {
            let mut orchestrator = ElicitationOrchestrator::new(instant());
            let err = orchestrator
                .create_session(CreateSessionCommand {
                    project_name: "   ".to_string(),
                })
                .unwrap_err();

            assert!(matches!(err, CreateSessionError::InvalidProjectName(_)));
            assert!(!orchestrator.session().is_started());
        }

        #[test]
        fn second_create_requires_reset() {
            let mut orchestrator = started(instant());
            let err = orchestrator
                .create_session(CreateSessionCommand {
                    project_name: "Other".to_string(),
                })
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidStateTransition);

            orchestrator.reset_session();
            assert!(orchestrator
                .create_session(CreateSessionCommand {
                    project_name: "Other".to_string(),
                })
                .is_ok());
        }
    }

    mod turns {
        use super::*;

        #[tokio::test]
        async fn captured_turn_publishes_user_then_reply() {
            let mut orchestrator = started(instant());
            let mut rx = orchestrator.subscribe();

            let result = orchestrator.submit_turn("Users can submit expense reports").await;

            assert!(result.outcome.is_captured());
            assert_eq!(orchestrator.stage(), Stage::Users);
            let events = drain(&mut rx);
            assert_eq!(events.len(), 2);
            match &events[0] {
                SessionEvent::Message(message) => assert!(message.is_user()),
                other => panic!("expected user message, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn rejected_turn_publishes_nothing() {
            let mut orchestrator = ElicitationOrchestrator::new(instant());
            let mut rx = orchestrator.subscribe();

            let result = orchestrator.submit_turn("hello").await;

            assert_eq!(
                result.outcome.result,
                TurnResult::Rejected(RejectReason::NotStarted)
            );
            assert!(drain(&mut rx).is_empty());
        }

        #[tokio::test]
        async fn ambiguous_turn_carries_suggestion() {
            let mock = MockAIProvider::new().with_response("Search returns in under 1 second");
            let advisor = RephrasingAdvisor::new(Arc::new(mock.clone()), 100);
            let mut orchestrator = started(instant()).with_advisor(advisor);
            let mut rx = orchestrator.subscribe();
            let logged_before = orchestrator.messages().len();

            let result = orchestrator.submit_turn("Search should be fast").await;

            assert_eq!(result.outcome.alert(), Some(AlertKind::Ambiguity));
            assert_eq!(
                result.suggestion.as_deref(),
                Some("Search returns in under 1 second")
            );
            assert_eq!(mock.call_count(), 1);
            assert_eq!(orchestrator.messages().len(), logged_before + 2);
            assert!(matches!(
                drain(&mut rx).last(),
                Some(SessionEvent::Suggestion { .. })
            ));
        }

        #[tokio::test]
        async fn advisor_failure_still_flags_turn() {
            let mock = MockAIProvider::new().with_error(AIError::rate_limited(30));
            let advisor = RephrasingAdvisor::new(Arc::new(mock), 100);
            let mut orchestrator = started(instant()).with_advisor(advisor);

            let result = orchestrator.submit_turn("Search should be fast").await;

            assert_eq!(result.outcome.alert(), Some(AlertKind::Ambiguity));
            assert!(result.suggestion.is_none());
            assert_eq!(orchestrator.stats().ambiguities, 1);
        }

        #[tokio::test]
        async fn advisor_not_consulted_for_clean_turns() {
            let mock = MockAIProvider::new();
            let advisor = RephrasingAdvisor::new(Arc::new(mock.clone()), 100);
            let mut orchestrator = started(instant()).with_advisor(advisor);

            orchestrator.submit_turn("Expense reports with receipts").await;

            assert_eq!(mock.call_count(), 0);
        }

        #[tokio::test]
        async fn reply_waits_for_turn_delay() {
            let config = OrchestratorConfig {
                turn_delay: Duration::from_millis(50),
                ..OrchestratorConfig::default()
            };
            let mut orchestrator = started(config);
            let start = std::time::Instant::now();

            orchestrator.submit_turn("Expense reports").await;

            assert!(start.elapsed() >= Duration::from_millis(50));
        }
    }

    mod reset {
        use super::*;

        #[tokio::test]
        async fn reset_clears_session_and_notifies() {
            let mut orchestrator = started(instant());
            orchestrator.submit_turn("Expense reports").await;
            let mut rx = orchestrator.subscribe();

            orchestrator.reset_session();

            assert!(!orchestrator.session().is_started());
            assert_eq!(orchestrator.stage(), Stage::Idle);
            assert!(orchestrator.messages().is_empty());
            assert!(orchestrator.snapshot().is_none());
            assert_eq!(drain(&mut rx), vec![SessionEvent::Reset]);
        }

        #[test]
        fn reset_keeps_configured_policy() {
            let mut orchestrator = started(OrchestratorConfig {
                validation_policy: ValidationPolicy::Enforced,
                ..instant()
            });
            orchestrator.reset_session();
            assert_eq!(
                orchestrator.session().validation_policy(),
                ValidationPolicy::Enforced
            );
        }
    }
}
