//! Storage provider trait for the filesystem the service writes to.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends.
///
/// Paths are absolute and have already been confined to the trusted root
/// by the caller. Implementations live in `intake-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Create a directory and any missing parents.
    async fn create_dir(&self, path: &Path) -> AppResult<()>;

    /// Write bytes to a new file. Fails with a conflict if the path is taken.
    async fn write_new(&self, path: &Path, data: Bytes) -> AppResult<()>;

    /// Move (rename) a file.
    async fn rename(&self, from: &Path, to: &Path) -> AppResult<()>;

    /// Delete a file. Missing files are not an error.
    async fn remove(&self, path: &Path) -> AppResult<()>;

    /// Check whether a regular file exists at the path.
    async fn file_exists(&self, path: &Path) -> AppResult<bool>;

    /// Check whether a directory exists at the path.
    async fn dir_exists(&self, path: &Path) -> AppResult<bool>;
}
