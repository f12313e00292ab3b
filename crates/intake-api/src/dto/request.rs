//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use intake_core::error::AppError;
use intake_core::result::AppResult;

/// Approval change for one upload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApprovalRequest {
    /// `"1"` to approve, `"0"` to leave pending.
    pub approved: String,
    /// Root-relative target directory; empty for none.
    #[serde(default)]
    #[validate(length(max = 4096, message = "Target directory path is too long"))]
    pub target_directory: String,
}

impl ApprovalRequest {
    /// Decode the approval flag.
    pub fn approved(&self) -> AppResult<bool> {
        match self.approved.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(AppError::validation(format!(
                "approved must be \"0\" or \"1\", got {other:?}"
            ))),
        }
    }

    /// The target directory, if one was given.
    pub fn target(&self) -> Option<&str> {
        Some(self.target_directory.trim()).filter(|t| !t.is_empty())
    }
}

/// Settings update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SettingsRequest {
    /// Base directory for target selection, relative to the trusted root.
    #[validate(length(max = 4096, message = "Target base directory path is too long"))]
    pub target_base_directory: String,
}

/// Status filter for the upload list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusFilter {
    /// `pending` or `approved`; absent lists everything.
    pub status: Option<String>,
}
