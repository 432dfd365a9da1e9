//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The orchestrator owns the one live session; export reads it through a
//! snapshot and never mutates it.

pub mod handlers;

pub use handlers::{
    CreateSessionCommand, CreateSessionError, CreateSessionResult, ElicitationOrchestrator,
    ExportDocumentCommand, ExportDocumentHandler, ExportDocumentResult, ExportError,
    OrchestratorConfig, RephrasingAdvisor, SessionEvent, SubmitTurnResult,
};
