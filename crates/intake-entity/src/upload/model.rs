//! Upload record entity model.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::UploadStatus;

/// One end-user submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UploadRecord {
    /// Unique identifier, assigned by the store.
    pub id: Uuid,
    /// Plain-text title, never empty.
    pub title: String,
    /// Sanitized rich-text description.
    pub description: String,
    /// Optional thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// The uploaded file's base name, kept for display.
    pub original_file_name: String,
    /// Absolute path of the stored file (staging area or target directory).
    pub staged_file_path: String,
    /// URL serving the staged file; cleared once the file is relocated.
    pub public_file_url: Option<String>,
    /// Approval flag.
    pub approved: bool,
    /// Identity of the submitter, if the host supplied one.
    pub submitted_by: Option<String>,
    /// When the file was last moved into a target directory.
    pub relocated_at: Option<DateTime<Utc>>,
    /// Diagnostic from the last failed relocation.
    pub relocation_error: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UploadRecord {
    /// Derived moderation status.
    pub fn status(&self) -> UploadStatus {
        UploadStatus::from_approved(self.approved)
    }

    /// Base name of the stored file.
    pub fn stored_file_name(&self) -> Option<&str> {
        Path::new(&self.staged_file_path)
            .file_name()
            .and_then(|n| n.to_str())
    }

    /// Whether the file has been moved out of the staging area.
    pub fn is_relocated(&self) -> bool {
        self.relocated_at.is_some()
    }

    /// Approved, but the last relocation attempt failed.
    pub fn relocation_pending(&self) -> bool {
        self.approved && self.relocation_error.is_some()
    }
}

/// Data required to create a new upload record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUpload {
    /// Sanitized title.
    pub title: String,
    /// Sanitized description.
    pub description: String,
    /// Sanitized thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Original base name of the uploaded file.
    pub original_file_name: String,
    /// Absolute path of the staged file.
    pub staged_file_path: String,
    /// URL of the staged file.
    pub public_file_url: Option<String>,
    /// Submitter identity.
    pub submitted_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UploadRecord {
        let now = Utc::now();
        UploadRecord {
            id: Uuid::new_v4(),
            title: "Vacation Photo".into(),
            description: String::new(),
            thumbnail_url: None,
            original_file_name: "img.png".into(),
            staged_file_path: "/srv/site/uploads/user-uploads/img.png".into(),
            public_file_url: Some("/uploads/user-uploads/img.png".into()),
            approved: false,
            submitted_by: None,
            relocated_at: None,
            relocation_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_follows_flag() {
        let mut rec = record();
        assert_eq!(rec.status(), UploadStatus::Pending);
        rec.approved = true;
        assert_eq!(rec.status(), UploadStatus::Approved);
    }

    #[test]
    fn test_stored_file_name() {
        assert_eq!(record().stored_file_name(), Some("img.png"));
    }

    #[test]
    fn test_relocation_pending() {
        let mut rec = record();
        rec.relocation_error = Some("permission denied".into());
        assert!(!rec.relocation_pending());
        rec.approved = true;
        assert!(rec.relocation_pending());
    }
}
