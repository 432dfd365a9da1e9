//! Document Generator Port - SRS rendering interface.
//!
//! Rendering is a pure function of a session snapshot and the generation
//! instant. Given the same inputs, implementations must return
//! byte-identical output.

use thiserror::Error;

use crate::domain::elicitation::SessionSnapshot;
use crate::domain::foundation::Timestamp;

/// Port for rendering captured requirements into a document.
///
/// # Usage
///
/// ```rust,ignore
/// let generator: &dyn DocumentGenerator = &TemplateDocumentGenerator::new();
/// let text = generator.generate(&snapshot, Timestamp::now())?;
/// let name = generator.file_name(&snapshot, Timestamp::now());
/// ```
pub trait DocumentGenerator: Send + Sync {
    /// Render the full document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::MissingData` if the snapshot has no project
    /// name.
    fn generate(
        &self,
        snapshot: &SessionSnapshot,
        generated_at: Timestamp,
    ) -> Result<String, DocumentError>;

    /// Suggested file name for the rendered document.
    fn file_name(&self, snapshot: &SessionSnapshot, generated_at: Timestamp) -> String;
}

/// Errors that can occur during document generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Missing required data: {field}")]
    MissingData { field: String },
}

impl DocumentError {
    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_error_displays_field() {
        let err = DocumentError::missing_data("project_name");
        assert_eq!(err.to_string(), "Missing required data: project_name");
    }

    #[test]
    fn document_generator_is_object_safe() {
        fn check<T: DocumentGenerator + ?Sized>() {}
        check::<dyn DocumentGenerator>();
    }
}
