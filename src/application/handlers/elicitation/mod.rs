//! Elicitation handlers.
//!
//! - `ElicitationOrchestrator` - owns the session, paces replies, publishes the log
//! - `RephrasingAdvisor` - optional AI rewrite of ambiguous statements
//! - `ExportDocumentHandler` - renders and stores the SRS document

mod clarification;
mod export_document;
mod orchestrator;

pub use clarification::RephrasingAdvisor;
pub use export_document::{
    ExportDocumentCommand, ExportDocumentHandler, ExportDocumentResult, ExportError,
};
pub use orchestrator::{
    CreateSessionCommand, CreateSessionError, CreateSessionResult, ElicitationOrchestrator,
    OrchestratorConfig, SessionEvent, SubmitTurnResult,
};
