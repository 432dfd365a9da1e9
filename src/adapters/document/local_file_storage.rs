//! Local Filesystem Storage Adapter - Implementation of DocumentFileStorage.
//!
//! Writes exported documents into a single output directory. Uses atomic
//! writes and records a SHA-256 checksum of what was written.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::ports::{DocumentFileStorage, StorageError, StoredFile};

/// Maximum document size accepted (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for exported documents.
///
/// # Atomic Writes
///
/// 1. Write content to `{name}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{name}`
#[derive(Debug, Clone)]
pub struct LocalDocumentFileStorage {
    output_dir: PathBuf,
}

impl LocalDocumentFileStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.tmp", file_name))
    }

    fn checked_name(file_name: &str) -> Result<&str, StorageError> {
        let bare = !file_name.is_empty()
            && file_name != "."
            && file_name != ".."
            && !file_name.contains(['/', '\\']);
        if bare {
            Ok(file_name)
        } else {
            Err(StorageError::invalid_file_name(file_name))
        }
    }

    /// Hex-encoded SHA-256 of `content`.
    pub fn compute_checksum(content: &str) -> String {
        let digest = Sha256::digest(content.as_bytes());
        format!("{:x}", digest)
    }
}

#[async_trait]
impl DocumentFileStorage for LocalDocumentFileStorage {
    async fn write(&self, file_name: &str, content: &str) -> Result<StoredFile, StorageError> {
        let file_name = Self::checked_name(file_name)?;

        let size = content.len() as u64;
        if size > MAX_FILE_SIZE_BYTES {
            return Err(StorageError::file_too_large(size, MAX_FILE_SIZE_BYTES));
        }

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let temp_path = self.temp_path(file_name);
        let final_path = self.file_path(file_name);

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.write_all(content.as_bytes()).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        let checksum = Self::compute_checksum(content);
        debug!(path = %final_path.display(), size, %checksum, "document written");

        Ok(StoredFile::new(final_path, size, checksum))
    }

    async fn read(&self, file_name: &str) -> Result<String, StorageError> {
        let path = self.file_path(Self::checked_name(file_name)?);

        fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StorageError::not_found(path.display().to_string()),
                std::io::ErrorKind::PermissionDenied => {
                    StorageError::permission_denied(path.display().to_string())
                }
                _ => StorageError::io(format!("Failed to read {}: {}", path.display(), e)),
            })
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, LocalDocumentFileStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalDocumentFileStorage::new(dir.path());
        (dir, storage)
    }

    #[tokio::test]
    async fn write_then_read_returns_content() {
        let (_dir, storage) = storage();

        let stored = storage.write("SRS_Acme_2026-10-19.txt", "body").await.unwrap();
        let content = storage.read("SRS_Acme_2026-10-19.txt").await.unwrap();

        assert_eq!(content, "body");
        assert_eq!(stored.size_bytes, 4);
        assert_eq!(stored.path, storage.file_path("SRS_Acme_2026-10-19.txt"));
    }

    #[tokio::test]
    async fn write_creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDocumentFileStorage::new(dir.path().join("nested/out"));

        storage.write("a.txt", "x").await.unwrap();

        assert!(dir.path().join("nested/out/a.txt").exists());
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file() {
        let (dir, storage) = storage();
        storage.write("a.txt", "x").await.unwrap();

        assert!(!dir.path().join("a.txt.tmp").exists());
    }

    #[tokio::test]
    async fn write_overwrites_existing_file() {
        let (_dir, storage) = storage();
        storage.write("a.txt", "first").await.unwrap();
        storage.write("a.txt", "second").await.unwrap();

        assert_eq!(storage.read("a.txt").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn checksum_is_sha256_hex() {
        let (_dir, storage) = storage();
        let stored = storage.write("a.txt", "hello").await.unwrap();

        assert_eq!(
            stored.checksum,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn rejects_path_separators() {
        let (_dir, storage) = storage();
        let err = storage.write("../escape.txt", "x").await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidFileName { .. }));
    }

    #[tokio::test]
    async fn rejects_oversized_content() {
        let (_dir, storage) = storage();
        let content = "a".repeat(MAX_FILE_SIZE_BYTES as usize + 1);

        let err = storage.write("big.txt", &content).await.unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let (_dir, storage) = storage();
        let err = storage.read("missing.txt").await.unwrap_err();

        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
