//! Response DTOs.

use serde::{Deserialize, Serialize};

use intake_core::types::pagination::PageResponse;
use intake_entity::catalog::DirectoryEntry;
use intake_service::{ModerationOutcome, UploadView};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> From<PageResponse<T>> for PaginatedResponse<T> {
    fn from(page: PageResponse<T>) -> Self {
        Self {
            items: page.items,
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// One option in the target directory picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryOption {
    /// Value submitted back as `target_directory`.
    pub path: String,
    /// Text shown to the administrator.
    pub label: String,
}

impl From<DirectoryEntry> for DirectoryOption {
    fn from(entry: DirectoryEntry) -> Self {
        Self {
            label: entry.path.clone(),
            path: entry.path,
        }
    }
}

/// Result of an approval change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalResponse {
    /// What happened to the file.
    #[serde(flatten)]
    pub outcome: ModerationOutcome,
    /// The upload after the change.
    pub upload: UploadView,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since start.
    pub uptime_seconds: u64,
    /// Whether the trusted root is reachable.
    pub storage: bool,
    /// `ok`, `unavailable`, or `memory` when no database is configured.
    pub database: String,
}
