//! File storage configuration.

use serde::{Deserialize, Serialize};

/// How staged files are named on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    /// Keep the uploaded base name; add a short unique suffix when it is taken.
    #[default]
    Original,
    /// Always store as `<uuid>.<ext>`.
    Unique,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Anchor directory; no staging, target or catalog path may resolve outside it.
    #[serde(default = "default_trusted_root")]
    pub trusted_root: String,
    /// Staging directory, relative to the trusted root.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    /// URL prefix under which the staging directory is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum upload size in bytes (default 64 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Staged file naming strategy.
    #[serde(default)]
    pub naming: NamingStrategy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            trusted_root: default_trusted_root(),
            staging_dir: default_staging_dir(),
            public_base_url: default_public_base_url(),
            max_upload_size_bytes: default_max_upload(),
            naming: NamingStrategy::default(),
        }
    }
}

fn default_trusted_root() -> String {
    "./data".to_string()
}

fn default_staging_dir() -> String {
    "uploads/user-uploads".to_string()
}

fn default_public_base_url() -> String {
    "/uploads/user-uploads".to_string()
}

fn default_max_upload() -> u64 {
    67_108_864 // 64 MB
}
