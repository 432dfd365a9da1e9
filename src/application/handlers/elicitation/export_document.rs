//! ExportDocumentHandler - renders the SRS and writes it to storage.
//!
//! Export is refused before anything is rendered when the session has no
//! project or no captured requirements. The session itself is only read.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::elicitation::ElicitationSession;
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::ports::{DocumentError, DocumentFileStorage, DocumentGenerator, StorageError};

/// Command to export the current session.
#[derive(Debug, Clone, Copy)]
pub struct ExportDocumentCommand {
    /// Instant stamped into the document and its file name.
    pub generated_at: Timestamp,
}

impl ExportDocumentCommand {
    pub fn now() -> Self {
        Self {
            generated_at: Timestamp::now(),
        }
    }

    pub fn at(generated_at: Timestamp) -> Self {
        Self { generated_at }
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocumentResult {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the written document.
    pub checksum: String,
    pub requirement_count: usize,
}

/// Errors that can occur when exporting.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error("No project has been created yet")]
    NotStarted,

    #[error("Please add at least one requirement before exporting")]
    NoRequirements,

    #[error("Document generation failed: {0}")]
    Generation(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ExportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::NotStarted => ErrorCode::SessionNotStarted,
            ExportError::NoRequirements => ErrorCode::NoRequirements,
            ExportError::Generation(_) => ErrorCode::InternalError,
            ExportError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

/// Handler for exporting SRS documents.
///
/// # Dependencies
///
/// - `DocumentGenerator`: renders the snapshot
/// - `DocumentFileStorage`: writes the rendered text
pub struct ExportDocumentHandler {
    generator: Arc<dyn DocumentGenerator>,
    storage: Arc<dyn DocumentFileStorage>,
}

impl ExportDocumentHandler {
    pub fn new(
        generator: Arc<dyn DocumentGenerator>,
        storage: Arc<dyn DocumentFileStorage>,
    ) -> Self {
        Self { generator, storage }
    }

    /// Renders the document without writing it.
    pub fn render(
        &self,
        session: &ElicitationSession,
        cmd: ExportDocumentCommand,
    ) -> Result<(String, String), ExportError> {
        let snapshot = session.snapshot().ok_or(ExportError::NotStarted)?;
        if snapshot.requirements.is_empty() {
            return Err(ExportError::NoRequirements);
        }

        let content = self.generator.generate(&snapshot, cmd.generated_at)?;
        let file_name = self.generator.file_name(&snapshot, cmd.generated_at);
        Ok((file_name, content))
    }

    pub async fn handle(
        &self,
        session: &ElicitationSession,
        cmd: ExportDocumentCommand,
    ) -> Result<ExportDocumentResult, ExportError> {
        let (file_name, content) = self.render(session, cmd)?;
        let stored = self.storage.write(&file_name, &content).await?;

        info!(
            session_id = %session.id(),
            path = %stored.path.display(),
            size_bytes = stored.size_bytes,
            requirements = session.requirement_count(),
            "SRS exported"
        );

        Ok(ExportDocumentResult {
            file_name,
            path: stored.path,
            size_bytes: stored.size_bytes,
            checksum: stored.checksum,
            requirement_count: session.requirement_count(),
        })
    }
}
