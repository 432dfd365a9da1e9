//! Elicitation domain module.
//!
//! Runs a scripted requirements interview. Each user turn is screened for
//! subjective wording and for conflicts with earlier answers before it is
//! captured as a requirement and the script moves to the next stage.

mod detector;
mod driver;
mod finding;
mod message;
mod session;
mod stage;

pub use detector::{
    scan_ambiguity, scan_contradiction, AmbiguityMatch, ConflictMatch, ConflictPair,
    ConflictSide, AMBIGUOUS_TERMS, CONFLICT_PAIRS,
};
pub use driver::{ConversationDriver, DriverStep, SessionStats};
pub use finding::{resolution_label, AmbiguityFinding, ContradictionFinding};
pub use message::{AlertKind, Message, Sender};
pub use session::{
    ElicitationSession, ProjectName, RejectReason, SessionSnapshot, TurnOutcome, TurnResult,
    ValidationPolicy, MAX_PROJECT_NAME_LENGTH,
};
pub use stage::Stage;
