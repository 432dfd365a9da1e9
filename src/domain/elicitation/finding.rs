//! Detector findings recorded against a session.
//!
//! Findings start unresolved. Nothing in the turn flow resolves them; the
//! flag exists so a later review step can mark them off.

use serde::{Deserialize, Serialize};

use super::detector::{AmbiguityMatch, ConflictMatch};

/// A statement that used subjective, unmeasurable wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityFinding {
    /// The user's statement, verbatim.
    pub source_text: String,
    /// Dictionary terms found in it. Never empty.
    pub matched_terms: Vec<String>,
    pub resolved: bool,
}

impl AmbiguityFinding {
    pub fn from_match(source_text: impl Into<String>, found: AmbiguityMatch) -> Self {
        Self {
            source_text: source_text.into(),
            matched_terms: found.into_terms(),
            resolved: false,
        }
    }

    /// Terms joined for single-line display.
    pub fn terms_joined(&self) -> String {
        self.matched_terms.join(", ")
    }
}

/// Two captured statements that cannot both hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictionFinding {
    /// First phrase of the conflicting pair.
    pub term_a: String,
    /// Second phrase of the conflicting pair.
    pub term_b: String,
    pub resolved: bool,
}

impl ContradictionFinding {
    pub fn from_match(found: &ConflictMatch) -> Self {
        Self {
            term_a: found.pair.a.to_string(),
            term_b: found.pair.b.to_string(),
            resolved: false,
        }
    }
}

/// Status line shared by both finding kinds.
pub fn resolution_label(resolved: bool) -> &'static str {
    if resolved {
        "RESOLVED"
    } else {
        "PENDING RESOLUTION"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elicitation::detector::{scan_ambiguity, scan_contradiction};

    #[test]
    fn ambiguity_finding_starts_unresolved() {
        let found = scan_ambiguity("fast and reliable").unwrap();
        let finding = AmbiguityFinding::from_match("fast and reliable", found);

        assert!(!finding.resolved);
        assert_eq!(finding.terms_joined(), "fast, reliable");
    }

    #[test]
    fn contradiction_finding_keeps_pair_order() {
        let found = scan_contradiction("real-time sync", &["offline first"]).unwrap();
        let finding = ContradictionFinding::from_match(&found);

        assert_eq!(finding.term_a, "offline");
        assert_eq!(finding.term_b, "real-time sync");
        assert!(!finding.resolved);
    }

    #[test]
    fn resolution_label_reflects_flag() {
        assert_eq!(resolution_label(false), "PENDING RESOLUTION");
        assert_eq!(resolution_label(true), "RESOLVED");
    }
}
