//! Repository traits and their implementations.
//!
//! Services depend on the traits; the binary picks PostgreSQL or the
//! in-memory implementation from `database.provider`.

pub mod memory;
pub mod settings;
pub mod upload;

use async_trait::async_trait;
use uuid::Uuid;

use intake_core::result::AppResult;
use intake_core::types::pagination::{PageRequest, PageResponse};
use intake_entity::settings::Settings;
use intake_entity::upload::{CreateUpload, UploadRecord, UploadStatus};

pub use memory::{MemorySettingsRepository, MemoryUploadRepository};
pub use settings::PgSettingsRepository;
pub use upload::PgUploadRepository;

/// Persistence for upload records.
#[async_trait]
pub trait UploadRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Create a pending record and return it with its assigned id.
    async fn create(&self, data: &CreateUpload) -> AppResult<UploadRecord>;

    /// Find a record by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UploadRecord>>;

    /// List records, newest first, optionally filtered by status.
    async fn list(
        &self,
        status: Option<UploadStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UploadRecord>>;

    /// Set the approval flag. Fails with not-found for unknown ids.
    async fn set_approved(&self, id: Uuid, approved: bool) -> AppResult<UploadRecord>;

    /// Record a completed relocation: new path, public URL cleared, error cleared.
    async fn record_relocation(&self, id: Uuid, new_path: &str) -> AppResult<UploadRecord>;

    /// Record a failed relocation attempt.
    async fn record_relocation_error(&self, id: Uuid, error: &str) -> AppResult<UploadRecord>;
}

/// Persistence for the settings value.
#[async_trait]
pub trait SettingsRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Read the current settings; defaults when nothing was saved.
    async fn get(&self) -> AppResult<Settings>;

    /// Overwrite the settings wholesale.
    async fn set(&self, settings: &Settings) -> AppResult<Settings>;
}
