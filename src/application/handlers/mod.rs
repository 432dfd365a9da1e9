//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod elicitation;

pub use elicitation::{
    CreateSessionCommand, CreateSessionError, CreateSessionResult, ElicitationOrchestrator,
    ExportDocumentCommand, ExportDocumentHandler, ExportDocumentResult, ExportError,
    OrchestratorConfig, RephrasingAdvisor, SessionEvent, SubmitTurnResult,
};
