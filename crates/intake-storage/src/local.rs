//! Local filesystem storage provider.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_core::traits::storage::StorageProvider;

use crate::confine::TrustedRoot;

/// Permission bits for directories created by the provider.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Local filesystem storage provider confined to a trusted root.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: TrustedRoot,
}

impl LocalStorageProvider {
    /// Create a provider for the given trusted root.
    pub fn new(root: TrustedRoot) -> Self {
        Self { root }
    }

    /// The trusted root this provider is confined to.
    pub fn root(&self) -> &TrustedRoot {
        &self.root
    }

    /// Reject paths outside the trusted root.
    fn ensure_within(&self, path: &Path) -> AppResult<()> {
        if self.root.contains(path) {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Path is outside the trusted root: {}",
                path.display()
            )))
        }
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(self.root.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn create_dir(&self, path: &Path) -> AppResult<()> {
        self.ensure_within(path)?;

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DIR_MODE);

        builder.create(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {}", path.display()),
                e,
            )
        })
    }

    async fn write_new(&self, path: &Path, data: Bytes) -> AppResult<()> {
        self.ensure_within(path)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    AppError::conflict(format!("File already exists: {}", path.display()))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create file: {}", path.display()),
                        e,
                    )
                }
            })?;

        let written = async {
            file.write_all(&data).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(path).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {}", path.display()),
                e,
            ));
        }

        debug!(path = %path.display(), bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> AppResult<()> {
        self.ensure_within(from)?;
        self.ensure_within(to)?;

        fs::rename(from, to).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("File vanished before it could be moved: {}", from.display()),
                    e,
                )
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to move {} -> {}", from.display(), to.display()),
                    e,
                )
            }
        })?;

        debug!(from = %from.display(), to = %to.display(), "Moved file");
        Ok(())
    }

    async fn remove(&self, path: &Path) -> AppResult<()> {
        self.ensure_within(path)?;

        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {}", path.display()),
                e,
            )),
        }
    }

    async fn file_exists(&self, path: &Path) -> AppResult<bool> {
        Ok(fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false))
    }

    async fn dir_exists(&self, path: &Path) -> AppResult<bool> {
        Ok(fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }
}
