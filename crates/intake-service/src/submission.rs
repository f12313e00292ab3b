//! End-user submission handling.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use intake_core::config::{NamingStrategy, StorageConfig};
use intake_core::error::{AppError, ErrorKind};
use intake_core::traits::{StorageProvider, SubmissionGuard};
use intake_database::UploadRepository;
use intake_entity::upload::CreateUpload;
use intake_storage::TrustedRoot;

use crate::context::RequestContext;
use crate::sanitize::{sanitize_file_name, sanitize_rich_text, sanitize_text, sanitize_url};

/// Message returned for an accepted submission.
pub const SUBMITTED_MESSAGE: &str = "Your upload has been submitted and is pending approval.";

/// How many names are tried before giving up on a free staging path.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Raw submission as received from the form.
#[derive(Debug, Clone, Default)]
pub struct SubmissionRequest {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub file: Option<FilePayload>,
    pub authorization_token: String,
}

/// The uploaded file.
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// Client-supplied file name, possibly with directory components.
    pub file_name: String,
    /// File contents.
    pub data: Bytes,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Id of the new pending record.
    pub id: Uuid,
    /// Message to show the submitter.
    pub message: String,
}

/// Reasons a submission is refused.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The form's authorization token did not verify.
    #[error("Submission authorization token rejected")]
    Unauthorized,

    /// Title empty after sanitization.
    #[error("Upload title is required")]
    MissingTitle,

    /// No file, or a file without a usable name.
    #[error("Upload file is required")]
    MissingFile,

    /// The payload exceeds the configured limit.
    #[error("Upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    /// Writing the staged file failed.
    #[error("Failed to stage upload: {0}")]
    Storage(#[source] AppError),

    /// Any other failure, typically the record store.
    #[error("Failed to record upload: {0}")]
    Other(#[source] AppError),
}

impl SubmissionError {
    /// The single message shown to the submitter for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => {
                "Submission could not be verified. Please reload the form and try again."
            }
            Self::MissingTitle => "Please provide a title for the upload.",
            Self::MissingFile => "Please upload a file.",
            Self::TooLarge { .. } => "The file is too large.",
            Self::Storage(_) => "File upload failed. Please try again.",
            Self::Other(_) => "There was an error processing your upload.",
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        let message = err.user_message();
        match err {
            SubmissionError::Unauthorized => AppError::authorization(message),
            SubmissionError::MissingTitle
            | SubmissionError::MissingFile
            | SubmissionError::TooLarge { .. } => AppError::validation(message),
            SubmissionError::Storage(e) => AppError::with_source(ErrorKind::Storage, message, e),
            SubmissionError::Other(e) => AppError::with_source(e.kind, message, e),
        }
    }
}

/// Accepts submissions: verifies, sanitizes, stages the file and records it.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    uploads: Arc<dyn UploadRepository>,
    storage: Arc<dyn StorageProvider>,
    guard: Arc<dyn SubmissionGuard>,
    root: TrustedRoot,
    config: StorageConfig,
}

impl SubmissionService {
    /// Creates a new submission service.
    pub fn new(
        uploads: Arc<dyn UploadRepository>,
        storage: Arc<dyn StorageProvider>,
        guard: Arc<dyn SubmissionGuard>,
        root: TrustedRoot,
        config: StorageConfig,
    ) -> Self {
        Self {
            uploads,
            storage,
            guard,
            root,
            config,
        }
    }

    /// Accept a submission.
    ///
    /// The token is checked before anything else happens. A record is only
    /// created once the file is on disk, and the staged file is removed again
    /// if the record cannot be created.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if !self.guard.verify(&request.authorization_token) {
            warn!(user = ctx.actor(), "Rejected submission with invalid authorization token");
            return Err(SubmissionError::Unauthorized);
        }

        let title = sanitize_text(&request.title);
        if title.is_empty() {
            return Err(SubmissionError::MissingTitle);
        }

        let (original_name, data) = request
            .file
            .and_then(|f| sanitize_file_name(&f.file_name).map(|name| (name, f.data)))
            .ok_or(SubmissionError::MissingFile)?;

        let limit = self.config.max_upload_size_bytes;
        if data.len() as u64 > limit {
            return Err(SubmissionError::TooLarge { limit });
        }

        let description = sanitize_rich_text(&request.description);
        let thumbnail_url = sanitize_url(&request.thumbnail_url);

        let staging = self.prepare_staging().await.map_err(SubmissionError::Storage)?;
        let (stored_name, path) = self
            .write_staged(&staging, &original_name, data)
            .await
            .map_err(SubmissionError::Storage)?;

        let create = CreateUpload {
            title,
            description,
            thumbnail_url,
            original_file_name: original_name,
            staged_file_path: path.to_string_lossy().into_owned(),
            public_file_url: Some(self.public_url(&stored_name)),
            submitted_by: ctx.user.clone(),
        };

        let record = match self.uploads.create(&create).await {
            Ok(record) => record,
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&path).await {
                    warn!(path = %path.display(), error = %cleanup, "Failed to remove orphaned staged file");
                }
                return Err(SubmissionError::Other(e));
            }
        };

        info!(
            upload_id = %record.id,
            title = %record.title,
            path = %record.staged_file_path,
            user = ctx.actor(),
            "Upload submitted"
        );

        Ok(SubmissionReceipt {
            id: record.id,
            message: SUBMITTED_MESSAGE.to_string(),
        })
    }

    /// Create the staging directory and resolve it inside the trusted root.
    async fn prepare_staging(&self) -> Result<PathBuf, AppError> {
        let joined = self.root.join_relative(&self.config.staging_dir)?;
        self.storage.create_dir(&joined).await?;
        self.root.resolve_dir(&self.config.staging_dir).await
    }

    /// Write the payload under a free name, returning the name and full path.
    async fn write_staged(
        &self,
        staging: &Path,
        original_name: &str,
        data: Bytes,
    ) -> Result<(String, PathBuf), AppError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = staged_name(self.config.naming, original_name, attempt);
            let path = staging.join(&name);
            match self.storage.write_new(&path, data.clone()).await {
                Ok(()) => return Ok((name, path)),
                Err(e) if e.is(ErrorKind::Conflict) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(AppError::conflict(format!(
            "No free staging name for {original_name} after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }

    fn public_url(&self, stored_name: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            stored_name
        )
    }
}

/// Name to try for the given attempt.
fn staged_name(naming: NamingStrategy, original: &str, attempt: usize) -> String {
    let (stem, ext) = split_extension(original);
    let token = Uuid::new_v4().simple().to_string();

    match naming {
        NamingStrategy::Original if attempt == 0 => original.to_string(),
        NamingStrategy::Original => match ext {
            Some(ext) => format!("{stem}-{}.{ext}", &token[..8]),
            None => format!("{stem}-{}", &token[..8]),
        },
        NamingStrategy::Unique => match ext {
            Some(ext) => format!("{token}.{ext}"),
            None => token,
        },
    }
}

/// Split `name.ext`; dotfiles without another dot have no extension.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(idx) if idx + 1 == name.len() => (name, None),
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
    }
}
