//! Document File Storage Port - where exported documents land.
//!
//! Exports are the only durable artifact. Writes must be atomic: a reader
//! sees either the previous file or the complete new one, never a partial
//! write.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Port for writing exported documents.
#[async_trait]
pub trait DocumentFileStorage: Send + Sync {
    /// Write `content` under `file_name`, replacing any existing file.
    ///
    /// `file_name` must be a bare name; path separators are rejected.
    async fn write(&self, file_name: &str, content: &str) -> Result<StoredFile, StorageError>;

    /// Read a previously written document back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing was written under that name.
    async fn read(&self, file_name: &str) -> Result<String, StorageError>;

    /// Full path a document with this name is stored at.
    fn file_path(&self, file_name: &str) -> PathBuf;
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}

impl StoredFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, checksum: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            checksum: checksum.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }
}

/// Errors that can occur during file storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Invalid file name: {file_name}")]
    InvalidFileName { file_name: String },

    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn invalid_file_name(file_name: impl Into<String>) -> Self {
        Self::InvalidFileName {
            file_name: file_name.into(),
        }
    }

    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(err.to_string())
            }
            _ => StorageError::io(err.to_string()),
        }
    }
}
