//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `elicitation` - Interview stages, detectors and the session reducer

pub mod elicitation;
pub mod foundation;
