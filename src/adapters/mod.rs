//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Anthropic and mock AI providers
//! - `document` - SRS template rendering and local file storage

pub mod ai;
pub mod document;
