//! Target directory catalog.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use intake_core::error::AppError;
use intake_core::result::AppResult;
use intake_database::SettingsRepository;
use intake_entity::catalog::DirectoryEntry;
use intake_storage::{list_directories, TrustedRoot};

/// Lists and validates the directories an approved file may be moved into.
///
/// Settings are read on every call, so a saved base directory takes effect
/// immediately. Nothing is cached.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: TrustedRoot,
    settings: Arc<dyn SettingsRepository>,
}

impl DirectoryCatalog {
    /// Creates a new catalog.
    pub fn new(root: TrustedRoot, settings: Arc<dyn SettingsRepository>) -> Self {
        Self { root, settings }
    }

    /// Every directory beneath `base`, depth-first in pre-order.
    pub async fn list(&self, base: &str) -> AppResult<Vec<DirectoryEntry>> {
        list_directories(&self.root, base).await
    }

    /// Every directory beneath the configured base. Empty when no base is set.
    pub async fn list_configured(&self) -> AppResult<Vec<DirectoryEntry>> {
        let settings = self.settings.get().await?;
        if !settings.has_target_base() {
            return Ok(Vec::new());
        }
        self.list(&settings.target_base_directory).await
    }

    /// Resolve an administrator-chosen target to its canonical path.
    ///
    /// The target must be an existing directory strictly beneath the
    /// configured base, after symbolic links are resolved.
    pub async fn resolve_target(&self, target: &str) -> AppResult<PathBuf> {
        let settings = self.settings.get().await?;
        if !settings.has_target_base() {
            return Err(AppError::validation(
                "No target base directory is configured",
            ));
        }
        let base = settings.target_base_directory.trim();

        let base_dir = self.root.resolve_dir(base).await.map_err(|e| {
            AppError::validation(format!(
                "Configured target base directory is not usable: {}",
                e.message
            ))
        })?;
        let target_dir = self.root.resolve_dir(target).await?;

        if target_dir == base_dir || !target_dir.starts_with(&base_dir) {
            warn!(target_directory = target, base, "Target directory outside the configured base");
            return Err(AppError::validation(format!(
                "Target directory must be beneath {base}: {target}"
            )));
        }

        Ok(target_dir)
    }
}

#[cfg(test)]
mod tests {
    use intake_core::error::ErrorKind;

    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_list_configured_follows_settings() {
        let fx = Fixture::new().await;
        fx.mkdirs(&["media/gallery/2024", "media/docs"]);

        assert!(fx.catalog.list_configured().await.unwrap().is_empty());

        fx.set_base("media").await;
        let mut paths: Vec<String> = fx
            .catalog
            .list_configured()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        paths.sort();
        assert_eq!(paths, vec!["media/docs", "media/gallery", "media/gallery/2024"]);
    }

    #[tokio::test]
    async fn test_resolve_target() {
        let fx = Fixture::new().await;
        fx.mkdirs(&["media/gallery/2024", "other"]);
        fx.set_base("media").await;

        let resolved = fx.catalog.resolve_target("media/gallery/2024").await.unwrap();
        assert_eq!(resolved, fx.root_path().join("media/gallery/2024"));

        for bad in ["media", "other", "../../etc", "media/missing", ""] {
            let err = fx.catalog.resolve_target(bad).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{bad}");
        }
    }

    #[tokio::test]
    async fn test_resolve_target_without_base() {
        let fx = Fixture::new().await;
        fx.mkdirs(&["media/gallery"]);
        let err = fx.catalog.resolve_target("media/gallery").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
