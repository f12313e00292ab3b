//! Shared fixture for service tests: a temporary trusted root wired to
//! in-memory repositories and the local storage provider.

use std::path::Path;
use std::sync::Arc;

use intake_core::config::StorageConfig;
use intake_database::repositories::{MemorySettingsRepository, MemoryUploadRepository};
use intake_database::SettingsRepository;
use intake_entity::settings::Settings;
use intake_storage::{LocalStorageProvider, TrustedRoot};

use crate::{DirectoryCatalog, ModerationService, SettingsService, SharedSecretGuard, SubmissionService};

pub struct Fixture {
    _dir: tempfile::TempDir,
    pub root: TrustedRoot,
    pub uploads: Arc<MemoryUploadRepository>,
    pub settings: Arc<MemorySettingsRepository>,
    pub catalog: Arc<DirectoryCatalog>,
    pub submissions: SubmissionService,
    pub moderation: ModerationService,
    pub settings_service: SettingsService,
}

impl Fixture {
    pub const SUBMISSION_TOKEN: &'static str = "form-secret";

    pub async fn new() -> Self {
        Self::with_config(StorageConfig::default()).await
    }

    pub async fn with_max_upload(limit: u64) -> Self {
        Self::with_config(StorageConfig {
            max_upload_size_bytes: limit,
            ..StorageConfig::default()
        })
        .await
    }

    pub async fn with_config(config: StorageConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = TrustedRoot::open(dir.path()).await.unwrap();
        let uploads = Arc::new(MemoryUploadRepository::new());
        let settings = Arc::new(MemorySettingsRepository::new());
        let storage = Arc::new(LocalStorageProvider::new(root.clone()));
        let guard = Arc::new(SharedSecretGuard::new(Self::SUBMISSION_TOKEN));

        let catalog = Arc::new(DirectoryCatalog::new(root.clone(), settings.clone()));
        let submissions = SubmissionService::new(
            uploads.clone(),
            storage.clone(),
            guard,
            root.clone(),
            config,
        );
        let moderation = ModerationService::new(uploads.clone(), storage, catalog.clone());
        let settings_service = SettingsService::new(settings.clone());

        Self {
            _dir: dir,
            root,
            uploads,
            settings,
            catalog,
            submissions,
            moderation,
            settings_service,
        }
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    pub fn mkdirs(&self, dirs: &[&str]) {
        for d in dirs {
            std::fs::create_dir_all(self.root_path().join(d)).unwrap();
        }
    }

    pub async fn set_base(&self, base: &str) {
        self.settings
            .set(&Settings {
                target_base_directory: base.to_string(),
            })
            .await
            .unwrap();
    }
}
