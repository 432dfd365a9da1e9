//! Conversation driver.
//!
//! Maps the current stage to the next one and to the text the assistant
//! says on the way. All wording lives here so the session only decides
//! *whether* to move, never *what* to say.

use serde::{Deserialize, Serialize};

use super::detector::{AmbiguityMatch, ConflictMatch};
use super::stage::Stage;
use crate::domain::foundation::StateMachine;

const INTRODUCTION: &str = "Hello! I'm your Requirements Gathering Assistant. I'll guide you \
through capturing all your project requirements in a structured way.";

/// Counts reported by the completion summary and status views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub requirements: usize,
    pub ambiguities: usize,
    pub contradictions: usize,
    pub unresolved_ambiguities: usize,
    pub unresolved_contradictions: usize,
}

/// One move of the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverStep {
    pub from: Stage,
    pub to: Stage,
    /// What the assistant says. `None` once the script is exhausted.
    pub reply: Option<String>,
}

/// Table-driven interview script.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationDriver;

impl ConversationDriver {
    /// Leaves `Idle` when a project is created.
    ///
    /// Fires once per session, independent of user input.
    pub fn introduce(project_name: &str) -> DriverStep {
        let to = Stage::Features;
        let prompt = to.prompt().unwrap_or_default();
        DriverStep {
            from: Stage::Idle,
            to,
            reply: Some(format!(
                "{}\n\n\u{2713} Project \"{}\" created successfully!\n\n{}",
                INTRODUCTION, project_name, prompt
            )),
        }
    }

    /// Advances past `current` after an accepted answer.
    ///
    /// `stats` must already include the answer just captured. At `Complete`
    /// the driver stays put and says nothing.
    pub fn advance(current: Stage, stats: &SessionStats) -> DriverStep {
        let Some(next) = current.successor() else {
            return DriverStep {
                from: current,
                to: current,
                reply: None,
            };
        };
        debug_assert!(current.can_transition_to(&next));

        let reply = match next.prompt() {
            Some(prompt) => format!("\u{2713} Understood!\n\n{}", prompt),
            None => Self::completion_summary(stats),
        };

        DriverStep {
            from: current,
            to: next,
            reply: Some(reply),
        }
    }

    /// Asks for more detail when a stage's validation rule rejects an answer.
    pub fn insufficient_detail(current: Stage) -> String {
        let prompt = current.prompt().unwrap_or("Please tell me more.");
        format!(
            "That answer is a little short for the {} step. Could you add more detail?\n\n{}",
            current.label().to_lowercase(),
            prompt
        )
    }

    /// Alert for subjective wording.
    pub fn ambiguity_alert(found: &AmbiguityMatch) -> String {
        format!(
            "AMBIGUITY DETECTED: The terms \"{}\" are subjective and unmeasurable.\n\n\
             Can you clarify with specific metrics or examples? For instance:\n\
             - Instead of \"{}\", specify: \"response time < 2 seconds\" or \"load time < 3 seconds\"\n\
             - Who are the users? What's the context?",
            found.terms().join("\", \""),
            found.first_term()
        )
    }

    /// Alert for a statement that conflicts with an earlier requirement.
    pub fn contradiction_alert(found: &ConflictMatch) -> String {
        format!(
            "CONTRADICTION DETECTED: You mentioned \"{}\" but earlier stated \"{}\".\n\n\
             These conflict with each other. Which takes priority? Please clarify your actual requirement.",
            found.incoming_phrase(),
            found.prior_phrase()
        )
    }

    fn completion_summary(stats: &SessionStats) -> String {
        format!(
            "\u{2713} Perfect! I've gathered all your requirements.\n\n\
             You have:\n\
             \u{2022} {} Requirements Captured\n\
             \u{2022} {} Ambiguities to Resolve\n\
             \u{2022} {} Contradictions to Resolve\n\n\
             Would you like to export your SRS document now?",
            stats.requirements, stats.unresolved_ambiguities, stats.unresolved_contradictions
        )
    }
}
