//! Document adapters.
//!
//! - `TemplateDocumentGenerator` - Fixed-template SRS renderer
//! - `LocalDocumentFileStorage` - Atomic writes to a local directory

mod local_file_storage;
mod template_generator;

pub use local_file_storage::LocalDocumentFileStorage;
pub use template_generator::{
    srs_file_name, summary_line, TemplateDocumentGenerator, SUMMARY_KEEP_CHARS,
    SUMMARY_MAX_CHARS,
};
