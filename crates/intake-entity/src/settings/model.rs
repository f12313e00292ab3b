//! Moderation settings.

use serde::{Deserialize, Serialize};

/// Storage key for the target base directory setting.
pub const TARGET_BASE_DIRECTORY_KEY: &str = "target_base_directory";

/// Administrator-managed settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory, relative to the trusted root, under which target
    /// directories are offered. Empty until an administrator saves one.
    pub target_base_directory: String,
}

impl Settings {
    /// Whether a base directory has been configured.
    pub fn has_target_base(&self) -> bool {
        !self.target_base_directory.trim().is_empty()
    }
}
