//! Elicitation session aggregate.
//!
//! The session owns everything one interview produces: the current stage,
//! captured requirements, detector findings and the message log. Turns are
//! applied as a reducer, `(session, text) -> (session, outcome)`, so there is
//! no ambient state and every caller sees exactly what a turn changed.
//!
//! # Invariants
//!
//! - A requirement is captured only when neither detector fired for it.
//! - A flagged turn never advances the stage.
//! - Sequences only grow between resets.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::detector::{scan_ambiguity, scan_contradiction};
use super::driver::{ConversationDriver, SessionStats};
use super::finding::{AmbiguityFinding, ContradictionFinding};
use super::message::{AlertKind, Message, Sender};
use super::stage::Stage;
use crate::domain::foundation::{DomainError, SessionId, Timestamp, ValidationError};

/// Longest project name accepted, in characters.
pub const MAX_PROJECT_NAME_LENGTH: usize = 200;

/// Name of the project being specified. Trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("project_name"));
        }
        let length = trimmed.chars().count();
        if length > MAX_PROJECT_NAME_LENGTH {
            return Err(ValidationError::too_long(
                "project_name",
                MAX_PROJECT_NAME_LENGTH,
                length,
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a stage's validation rule can hold back an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Rule is evaluated and reported but never blocks capture.
    #[default]
    Advisory,
    /// A failing answer is not captured and the stage question is repeated.
    Enforced,
}

/// Why a turn was not processed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    EmptyInput,
    NotStarted,
}

/// What a turn did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    /// Nothing recorded, not even the user message.
    Rejected(RejectReason),
    /// Subjective wording; the finding was recorded, nothing captured.
    AmbiguityFlagged(AmbiguityFinding),
    /// Conflicts with an earlier requirement; nothing captured.
    ContradictionFlagged(ContradictionFinding),
    /// Enforced validation rejected the answer for this stage.
    InsufficientDetail { stage: Stage },
    /// Captured as a requirement and the driver moved on.
    Captured {
        from: Stage,
        to: Stage,
        validation_passed: bool,
    },
}

/// Result of one turn plus the messages it appended, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub result: TurnResult,
    pub emitted: Vec<Message>,
}

impl TurnOutcome {
    fn rejected(reason: RejectReason) -> Self {
        Self {
            result: TurnResult::Rejected(reason),
            emitted: Vec::new(),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self.result, TurnResult::Captured { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.result, TurnResult::Rejected(_))
    }

    /// Kind of alert raised, if the turn was flagged.
    pub fn alert(&self) -> Option<AlertKind> {
        match self.result {
            TurnResult::AmbiguityFlagged(_) => Some(AlertKind::Ambiguity),
            TurnResult::ContradictionFlagged(_) => Some(AlertKind::Contradiction),
            _ => None,
        }
    }
}

/// Read-only copy of a session, handed to the document generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub project_name: String,
    pub stage: Stage,
    pub requirements: Vec<String>,
    pub ambiguities: Vec<AmbiguityFinding>,
    pub contradictions: Vec<ContradictionFinding>,
    pub messages: Vec<Message>,
}

impl SessionSnapshot {
    pub fn stats(&self) -> SessionStats {
        stats_of(&self.requirements, &self.ambiguities, &self.contradictions)
    }
}

/// One interview, from project creation to reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElicitationSession {
    id: SessionId,
    project_name: Option<ProjectName>,
    stage: Stage,
    requirements: Vec<String>,
    ambiguities: Vec<AmbiguityFinding>,
    contradictions: Vec<ContradictionFinding>,
    messages: Vec<Message>,
    validation_policy: ValidationPolicy,
    created_at: Timestamp,
}

impl Default for ElicitationSession {
    fn default() -> Self {
        Self::idle(ValidationPolicy::default())
    }
}

impl ElicitationSession {
    /// An empty session with no project, waiting in `Idle`.
    pub fn idle(validation_policy: ValidationPolicy) -> Self {
        Self {
            id: SessionId::new(),
            project_name: None,
            stage: Stage::Idle,
            requirements: Vec::new(),
            ambiguities: Vec::new(),
            contradictions: Vec::new(),
            messages: Vec::new(),
            validation_policy,
            created_at: Timestamp::now(),
        }
    }

    /// Starts an interview for `project_name`.
    ///
    /// Fires the driver's one-off `Idle` transition: the introduction is
    /// logged and the session waits in `Features`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `ValidationFailed` if the name is too long
    pub fn create(
        project_name: &str,
        validation_policy: ValidationPolicy,
    ) -> Result<Self, DomainError> {
        let project_name = ProjectName::new(project_name)?;
        let mut session = Self::idle(validation_policy);

        let step = ConversationDriver::introduce(project_name.as_str());
        session.stage = step.to;
        if let Some(reply) = step.reply {
            session
                .messages
                .push(Message::composed(Sender::Bot, reply, None));
        }
        session.project_name = Some(project_name);

        Ok(session)
    }

    /// Applies one user turn.
    ///
    /// Blank text and turns before project creation are rejected without
    /// touching the session. Otherwise the user message is logged first,
    /// then the ambiguity detector, the contradiction detector and the stage
    /// rule run in that order; the first one to object ends the turn.
    pub fn submit_turn(mut self, text: &str) -> (Self, TurnOutcome) {
        if self.project_name.is_none() {
            return (self, TurnOutcome::rejected(RejectReason::NotStarted));
        }
        let user_message = match Message::user(text) {
            Ok(message) => message,
            Err(_) => return (self, TurnOutcome::rejected(RejectReason::EmptyInput)),
        };

        let first_new = self.messages.len();
        self.messages.push(user_message);

        let result = self.respond(text);
        let emitted = self.messages[first_new..].to_vec();
        (self, TurnOutcome { result, emitted })
    }

    /// Discards the interview, returning an idle session with the same
    /// validation policy.
    pub fn reset(self) -> Self {
        Self::idle(self.validation_policy)
    }

    fn respond(&mut self, text: &str) -> TurnResult {
        if let Some(found) = scan_ambiguity(text) {
            debug!(session_id = %self.id, terms = ?found.terms(), "ambiguous statement");
            let alert = ConversationDriver::ambiguity_alert(&found);
            let finding = AmbiguityFinding::from_match(text, found);
            self.ambiguities.push(finding.clone());
            self.push_alert(AlertKind::Ambiguity, alert);
            return TurnResult::AmbiguityFlagged(finding);
        }

        if let Some(found) = scan_contradiction(text, &self.requirements) {
            debug!(
                session_id = %self.id,
                incoming = found.incoming_phrase(),
                prior = found.prior_phrase(),
                "contradicts earlier requirement"
            );
            let finding = ContradictionFinding::from_match(&found);
            self.contradictions.push(finding.clone());
            self.push_alert(
                AlertKind::Contradiction,
                ConversationDriver::contradiction_alert(&found),
            );
            return TurnResult::ContradictionFlagged(finding);
        }

        let current = self.stage;
        let validation_passed = current.validate(text);
        if !validation_passed && self.validation_policy == ValidationPolicy::Enforced {
            debug!(session_id = %self.id, stage = %current, "answer below stage threshold");
            self.messages.push(Message::composed(
                Sender::Bot,
                ConversationDriver::insufficient_detail(current),
                None,
            ));
            return TurnResult::InsufficientDetail { stage: current };
        }

        self.requirements.push(text.to_string());
        let step = ConversationDriver::advance(current, &self.stats());
        self.stage = step.to;
        if let Some(reply) = step.reply {
            self.messages.push(Message::composed(Sender::Bot, reply, None));
        }
        debug!(
            session_id = %self.id,
            from = %step.from,
            to = %step.to,
            validation_passed,
            "requirement captured"
        );

        TurnResult::Captured {
            from: step.from,
            to: step.to,
            validation_passed,
        }
    }

    fn push_alert(&mut self, kind: AlertKind, text: String) {
        self.messages
            .push(Message::composed(Sender::Bot, text, Some(kind)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read-only views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn project_name(&self) -> Option<&ProjectName> {
        self.project_name.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.project_name.is_some()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }

    pub fn ambiguities(&self) -> &[AmbiguityFinding] {
        &self.ambiguities
    }

    pub fn contradictions(&self) -> &[ContradictionFinding] {
        &self.contradictions
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        self.validation_policy
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn stats(&self) -> SessionStats {
        stats_of(&self.requirements, &self.ambiguities, &self.contradictions)
    }

    /// Copies the session for rendering. `None` before a project exists.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let project_name = self.project_name.as_ref()?;
        Some(SessionSnapshot {
            session_id: self.id,
            project_name: project_name.as_str().to_string(),
            stage: self.stage,
            requirements: self.requirements.clone(),
            ambiguities: self.ambiguities.clone(),
            contradictions: self.contradictions.clone(),
            messages: self.messages.clone(),
        })
    }
}

fn stats_of(
    requirements: &[String],
    ambiguities: &[AmbiguityFinding],
    contradictions: &[ContradictionFinding],
) -> SessionStats {
    SessionStats {
        requirements: requirements.len(),
        ambiguities: ambiguities.len(),
        contradictions: contradictions.len(),
        unresolved_ambiguities: ambiguities.iter().filter(|a| !a.resolved).count(),
        unresolved_contradictions: contradictions.iter().filter(|c| !c.resolved).count(),
    }
}
