//! Lexical detectors for ambiguous and contradictory statements.
//!
//! Both detectors are plain case-insensitive substring checks against fixed
//! vocabularies. There is no tokenisation and no word-boundary handling, so
//! "goodwill" is flagged for containing "good". That over-match is accepted
//! behaviour: a false alarm costs one clarification, a missed one costs a
//! vague requirement in the final document.

use serde::{Deserialize, Serialize};

/// Subjective or unmeasurable terms, in reporting order.
pub const AMBIGUOUS_TERMS: [&str; 20] = [
    "fast",
    "slow",
    "easy",
    "hard",
    "good",
    "bad",
    "simple",
    "complex",
    "reliable",
    "robust",
    "scalable",
    "efficient",
    "user-friendly",
    "responsive",
    "better",
    "worse",
    "modern",
    "clean",
    "nice",
    "smooth",
];

/// Two phrases that cannot both hold for the same system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictPair {
    pub a: &'static str,
    pub b: &'static str,
}

/// Known conflicts, checked in this order.
pub const CONFLICT_PAIRS: [ConflictPair; 4] = [
    ConflictPair {
        a: "offline",
        b: "real-time sync",
    },
    ConflictPair {
        a: "low budget",
        b: "enterprise scale",
    },
    ConflictPair {
        a: "mobile only",
        b: "desktop",
    },
    ConflictPair {
        a: "zero latency",
        b: "high security",
    },
];

/// Dictionary terms found in one input. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityMatch {
    terms: Vec<String>,
}

impl AmbiguityMatch {
    /// All matched terms, in dictionary order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The first matched term; used to phrase the rephrasing suggestion.
    pub fn first_term(&self) -> &str {
        // constructed only from a non-empty list
        self.terms.first().map(String::as_str).unwrap_or_default()
    }

    pub fn into_terms(self) -> Vec<String> {
        self.terms
    }
}

/// Which side of a conflict pair the incoming text carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSide {
    A,
    B,
}

/// A conflict between incoming text and one captured requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMatch {
    /// The pair that fired.
    pub pair: ConflictPair,
    /// Side mentioned by the incoming text.
    pub incoming_side: ConflictSide,
    /// Index of the earlier requirement holding the opposite side.
    pub requirement_index: usize,
}

impl ConflictMatch {
    /// Phrase found in the incoming text.
    pub fn incoming_phrase(&self) -> &'static str {
        match self.incoming_side {
            ConflictSide::A => self.pair.a,
            ConflictSide::B => self.pair.b,
        }
    }

    /// Phrase found in the earlier requirement.
    pub fn prior_phrase(&self) -> &'static str {
        match self.incoming_side {
            ConflictSide::A => self.pair.b,
            ConflictSide::B => self.pair.a,
        }
    }
}

/// Scans `input` for subjective terms.
///
/// Returns `None` when nothing matches; a returned match always holds at
/// least one term.
pub fn scan_ambiguity(input: &str) -> Option<AmbiguityMatch> {
    let lowered = input.to_lowercase();
    let terms: Vec<String> = AMBIGUOUS_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .map(|term| term.to_string())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(AmbiguityMatch { terms })
    }
}

/// Scans `input` against previously captured requirements for a known
/// conflict.
///
/// Pairs are tried in [`CONFLICT_PAIRS`] order and, within a pair, prior
/// requirements in capture order; the first hit is returned. A single input
/// carrying both sides of a pair is not reported.
pub fn scan_contradiction<S: AsRef<str>>(
    input: &str,
    prior_requirements: &[S],
) -> Option<ConflictMatch> {
    let lowered = input.to_lowercase();

    for pair in CONFLICT_PAIRS {
        let has_a = lowered.contains(pair.a);
        let has_b = lowered.contains(pair.b);
        if !has_a && !has_b {
            continue;
        }

        for (index, requirement) in prior_requirements.iter().enumerate() {
            let prior = requirement.as_ref().to_lowercase();
            let incoming_side = if has_a && prior.contains(pair.b) {
                ConflictSide::A
            } else if has_b && prior.contains(pair.a) {
                ConflictSide::B
            } else {
                continue;
            };

            return Some(ConflictMatch {
                pair,
                incoming_side,
                requirement_index: index,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod ambiguity {
        use super::*;

        #[test]
        fn flags_subjective_term() {
            let found = scan_ambiguity("The system must be very fast").unwrap();
            assert_eq!(found.terms(), &["fast".to_string()]);
            assert_eq!(found.first_term(), "fast");
        }

        #[test]
        fn is_case_insensitive() {
            let found = scan_ambiguity("A ROBUST and Scalable backend").unwrap();
            assert_eq!(found.terms(), &["robust".to_string(), "scalable".to_string()]);
        }

        #[test]
        fn reports_terms_in_dictionary_order() {
            let found = scan_ambiguity("smooth, clean and easy").unwrap();
            assert_eq!(
                found.into_terms(),
                vec!["easy".to_string(), "clean".to_string(), "smooth".to_string()]
            );
        }

        #[test]
        fn matches_inside_larger_words() {
            let found = scan_ambiguity("Track customer goodwill").unwrap();
            assert!(found.terms().contains(&"good".to_string()));
        }

        #[test]
        fn returns_none_for_measurable_statement() {
            assert!(scan_ambiguity("Pages load in under 2 seconds").is_none());
        }

        #[test]
        fn returns_none_for_empty_input() {
            assert!(scan_ambiguity("").is_none());
        }
    }

    mod contradiction {
        use super::*;

        #[test]
        fn flags_cross_message_conflict() {
            let prior = vec!["We need offline support".to_string()];
            let found = scan_contradiction("Also need real-time sync", &prior).unwrap();

            assert_eq!(found.pair, CONFLICT_PAIRS[0]);
            assert_eq!(found.incoming_side, ConflictSide::B);
            assert_eq!(found.incoming_phrase(), "real-time sync");
            assert_eq!(found.prior_phrase(), "offline");
            assert_eq!(found.requirement_index, 0);
        }

        #[test]
        fn flags_conflict_in_either_direction() {
            let prior = ["Runs on desktop machines"];
            let found = scan_contradiction("Ship it as MOBILE ONLY", &prior).unwrap();

            assert_eq!(found.incoming_side, ConflictSide::A);
            assert_eq!(found.incoming_phrase(), "mobile only");
            assert_eq!(found.prior_phrase(), "desktop");
        }

        #[test]
        fn ignores_both_sides_in_same_input() {
            let prior: [&str; 0] = [];
            assert!(scan_contradiction("offline with real-time sync", &prior).is_none());
        }

        #[test]
        fn both_sides_in_input_still_conflict_with_history() {
            let prior = ["Must work offline"];
            let found = scan_contradiction("offline plus real-time sync", &prior).unwrap();
            assert_eq!(found.pair, CONFLICT_PAIRS[0]);
        }

        #[test]
        fn returns_first_pair_in_declared_order() {
            let prior = ["zero latency everywhere", "works offline"];
            let found =
                scan_contradiction("real-time sync with high security", &prior).unwrap();

            assert_eq!(found.pair, CONFLICT_PAIRS[0]);
            assert_eq!(found.requirement_index, 1);
        }

        #[test]
        fn returns_earliest_requirement_within_pair() {
            let prior = ["a desktop client", "and a desktop admin"];
            let found = scan_contradiction("mobile only", &prior).unwrap();
            assert_eq!(found.requirement_index, 0);
        }

        #[test]
        fn returns_none_without_history() {
            let prior: Vec<String> = Vec::new();
            assert!(scan_contradiction("enterprise scale", &prior).is_none());
        }
    }

    proptest! {
        #[test]
        fn any_dictionary_term_is_flagged(
            index in 0..AMBIGUOUS_TERMS.len(),
            prefix in "[a-z ]{0,12}",
            suffix in "[a-z ]{0,12}",
            upper in any::<bool>(),
        ) {
            let term = AMBIGUOUS_TERMS[index];
            let term = if upper { term.to_uppercase() } else { term.to_string() };
            let text = format!("{}{}{}", prefix, term, suffix);

            let found = scan_ambiguity(&text);
            prop_assert!(found.is_some());
            prop_assert!(found.unwrap().terms().contains(&AMBIGUOUS_TERMS[index].to_string()));
        }

        #[test]
        fn any_pair_conflicts_across_messages(
            index in 0..CONFLICT_PAIRS.len(),
            reversed in any::<bool>(),
        ) {
            let pair = CONFLICT_PAIRS[index];
            let (earlier, later) = if reversed { (pair.b, pair.a) } else { (pair.a, pair.b) };
            let prior = [format!("We want {}", earlier)];

            let found = scan_contradiction(&format!("Also {}", later), &prior);
            prop_assert!(found.is_some());
            let found = found.unwrap();
            prop_assert_eq!(found.incoming_phrase(), later);
            prop_assert_eq!(found.prior_phrase(), earlier);
        }
    }
}
