//! Interview stages.
//!
//! The interview is a fixed script. Each non-terminal stage carries the
//! prompt that opens it, a validation rule for answers given while in it,
//! and the stage that follows.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// A named step in the interview script.
///
/// Stages advance strictly in declaration order:
/// `Idle` → `Features` → `Users` → `Performance` → `Security` →
/// `Timeline` → `Budget` → `Constraints` → `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No project yet; leaves as soon as the project is created.
    #[default]
    Idle,
    Features,
    Users,
    Performance,
    Security,
    Timeline,
    Budget,
    Constraints,
    /// Script exhausted. Input is still captured but never prompted for.
    Complete,
}

impl Stage {
    /// Every stage in script order.
    pub const ORDER: [Stage; 9] = [
        Stage::Idle,
        Stage::Features,
        Stage::Users,
        Stage::Performance,
        Stage::Security,
        Stage::Timeline,
        Stage::Budget,
        Stage::Constraints,
        Stage::Complete,
    ];

    /// The stage that follows this one, or `None` at `Complete`.
    pub fn successor(&self) -> Option<Stage> {
        match self {
            Self::Idle => Some(Self::Features),
            Self::Features => Some(Self::Users),
            Self::Users => Some(Self::Performance),
            Self::Performance => Some(Self::Security),
            Self::Security => Some(Self::Timeline),
            Self::Timeline => Some(Self::Budget),
            Self::Budget => Some(Self::Constraints),
            Self::Constraints => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Question asked when the interview enters this stage.
    ///
    /// `Idle` and `Complete` have no question: the first is answered by
    /// project creation, the second ends the script.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::Idle | Self::Complete => None,
            Self::Features => Some(
                "Great! Now, what are the main FEATURES or FUNCTIONALITIES your system should have?",
            ),
            Self::Users => Some(
                "Excellent! WHO will use this system? (e.g., customers, employees, admins)",
            ),
            Self::Performance => Some(
                "What are your PERFORMANCE requirements? (e.g., response time, uptime, concurrent users)",
            ),
            Self::Security => Some(
                "What are your SECURITY and COMPLIANCE requirements? (e.g., encryption, data privacy, industry standards)",
            ),
            Self::Timeline => Some("What is your PROJECT TIMELINE? (e.g., 3 months, 6 weeks)"),
            Self::Budget => Some("What is your BUDGET for this project?"),
            Self::Constraints => {
                Some("Any other CONSTRAINTS or TECHNICAL PREFERENCES we should know about?")
            }
        }
    }

    /// Checks an answer given while in this stage.
    ///
    /// Only `Features` (more than 5 characters) and `Users` (more than 3)
    /// impose anything; every other stage accepts any text.
    pub fn validate(&self, answer: &str) -> bool {
        let length = answer.chars().count();
        match self {
            Self::Features => length > 5,
            Self::Users => length > 3,
            _ => true,
        }
    }

    /// Short label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Features => "Features",
            Self::Users => "Users",
            Self::Performance => "Performance",
            Self::Security => "Security",
            Self::Timeline => "Timeline",
            Self::Budget => "Budget",
            Self::Constraints => "Constraints",
            Self::Complete => "Complete",
        }
    }

    /// Zero-based position in [`Stage::ORDER`].
    pub fn position(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|stage| stage == self)
            .unwrap_or_default()
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.successor() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.successor().into_iter().collect()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
