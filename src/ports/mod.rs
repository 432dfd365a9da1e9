//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Optional language-model collaborator
//! - `DocumentGenerator` - Renders a session snapshot into an SRS document
//! - `DocumentFileStorage` - Durable storage for exported documents

mod ai_provider;
mod document_file_storage;
mod document_generator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, PromptMessage,
    PromptRole, ProviderInfo, TokenUsage,
};
pub use document_file_storage::{DocumentFileStorage, StorageError, StoredFile};
pub use document_generator::{DocumentError, DocumentGenerator};
