//! Moderation: approval and relocation of submitted files.
//!
//! Approving an upload with a target directory moves its file out of the
//! staging area. The move never overwrites an existing file, and a failed
//! move leaves the file where it was with the failure recorded on the
//! upload so the divergence stays visible.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_core::traits::StorageProvider;
use intake_core::types::pagination::{PageRequest, PageResponse};
use intake_database::UploadRepository;
use intake_entity::upload::{UploadRecord, UploadStatus};

use crate::catalog::DirectoryCatalog;
use crate::context::RequestContext;

/// What an approval change did to the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ModerationOutcome {
    /// Flag updated; no file operation was requested.
    Updated,
    /// The file was moved to `path`.
    Relocated { path: String },
    /// The file was already at its destination.
    AlreadyInPlace,
}

/// An upload as shown to administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadView {
    #[serde(flatten)]
    pub record: UploadRecord,
    pub status: UploadStatus,
    /// The stored file is not where the record says it is.
    pub file_missing: bool,
}

/// Administrator operations on uploads.
#[derive(Debug, Clone)]
pub struct ModerationService {
    uploads: Arc<dyn UploadRepository>,
    storage: Arc<dyn StorageProvider>,
    catalog: Arc<DirectoryCatalog>,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        uploads: Arc<dyn UploadRepository>,
        storage: Arc<dyn StorageProvider>,
        catalog: Arc<DirectoryCatalog>,
    ) -> Self {
        Self {
            uploads,
            storage,
            catalog,
        }
    }

    /// Fetch one upload.
    pub async fn get_upload(&self, id: Uuid) -> AppResult<UploadView> {
        let record = self.find(id).await?;
        self.view(record).await
    }

    /// List uploads newest first, optionally filtered by status.
    pub async fn list_uploads(
        &self,
        status: Option<UploadStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UploadView>> {
        let records = self.uploads.list(status, page).await?;

        let mut items = Vec::with_capacity(records.items.len());
        for record in records.items {
            items.push(self.view(record).await?);
        }

        Ok(PageResponse::new(
            items,
            records.page,
            records.page_size,
            records.total_items,
        ))
    }

    /// Set the approval flag and, when approving into a target, move the file.
    ///
    /// The target is validated before the flag changes, so a rejected target
    /// leaves the upload untouched. Once the flag is set it stays set even if
    /// the move fails. Approving an upload that is already approved and
    /// relocated changes nothing, whatever target is given.
    pub async fn set_approval(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        approved: bool,
        target_directory: Option<&str>,
    ) -> AppResult<ModerationOutcome> {
        let existing = self.find(id).await?;

        // A moved file only moves again after an unapprove or a failed attempt.
        if approved
            && existing.approved
            && existing.is_relocated()
            && !existing.relocation_pending()
        {
            debug!(upload_id = %id, path = %existing.staged_file_path, "Upload already relocated");
            return Ok(ModerationOutcome::AlreadyInPlace);
        }

        let target = match target_directory.map(str::trim).filter(|t| !t.is_empty()) {
            Some(dir) if approved => Some(self.catalog.resolve_target(dir).await?),
            _ => None,
        };

        let record = self.uploads.set_approved(id, approved).await?;
        info!(
            upload_id = %id,
            approved,
            user = ctx.actor(),
            "Upload approval updated"
        );

        match target {
            Some(dir) => self.relocate(&record, &dir).await,
            None => Ok(ModerationOutcome::Updated),
        }
    }

    async fn relocate(&self, record: &UploadRecord, target_dir: &Path) -> AppResult<ModerationOutcome> {
        let source = PathBuf::from(&record.staged_file_path);
        let Some(file_name) = source.file_name() else {
            return Err(AppError::conflict(format!(
                "Stored file path has no file name: {}",
                source.display()
            )));
        };
        let dest = target_dir.join(file_name);
        let dest_str = dest.to_string_lossy().into_owned();

        let source_exists = self.storage.file_exists(&source).await?;

        if source == dest && source_exists {
            return Ok(ModerationOutcome::AlreadyInPlace);
        }

        if !source_exists {
            if self.storage.file_exists(&dest).await? {
                self.uploads.record_relocation(record.id, &dest_str).await?;
                return Ok(ModerationOutcome::AlreadyInPlace);
            }
            let message = format!("Stored file is missing: {}", source.display());
            self.note_failure(record.id, &message).await;
            return Err(AppError::conflict(message));
        }

        if self.storage.file_exists(&dest).await? || self.storage.dir_exists(&dest).await? {
            let message = format!("Destination already exists: {}", dest.display());
            self.note_failure(record.id, &message).await;
            return Err(AppError::conflict(message));
        }

        match self.storage.rename(&source, &dest).await {
            Ok(()) => {
                self.uploads.record_relocation(record.id, &dest_str).await?;
                info!(upload_id = %record.id, from = %source.display(), to = %dest_str, "Upload relocated");
                Ok(ModerationOutcome::Relocated { path: dest_str })
            }
            Err(e) if e.is(ErrorKind::Conflict) => {
                // source vanished between the check and the move
                if self.storage.file_exists(&dest).await? {
                    self.uploads.record_relocation(record.id, &dest_str).await?;
                    return Ok(ModerationOutcome::AlreadyInPlace);
                }
                self.note_failure(record.id, &e.message).await;
                Err(e)
            }
            Err(e) => {
                warn!(upload_id = %record.id, error = %e, "Relocation failed");
                self.note_failure(record.id, &e.message).await;
                Err(e)
            }
        }
    }

    /// Record a relocation failure on the upload. The caller's error wins.
    async fn note_failure(&self, id: Uuid, message: &str) {
        if let Err(e) = self.uploads.record_relocation_error(id, message).await {
            warn!(upload_id = %id, error = %e, "Failed to record relocation error");
        }
    }

    async fn find(&self, id: Uuid) -> AppResult<UploadRecord> {
        self.uploads
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Upload {id} not found")))
    }

    async fn view(&self, record: UploadRecord) -> AppResult<UploadView> {
        let file_missing = !self
            .storage
            .file_exists(Path::new(&record.staged_file_path))
            .await?;
        Ok(UploadView {
            status: record.status(),
            file_missing,
            record,
        })
    }
}
