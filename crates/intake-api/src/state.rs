//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use intake_core::config::AppConfig;
use intake_core::traits::StorageProvider;
use intake_database::DatabasePool;
use intake_service::{
    DirectoryCatalog, ModerationService, SettingsService, SharedSecretGuard, SubmissionService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for the health endpoint
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Storage provider confined to the trusted root
    pub storage: Arc<dyn StorageProvider>,
    /// PostgreSQL pool; `None` with the in-memory record store
    pub database: Option<DatabasePool>,
    /// Verifies the admin bearer credential
    pub admin_guard: Arc<SharedSecretGuard>,

    // ── Services ─────────────────────────────────────────────
    /// End-user submissions
    pub submission_service: Arc<SubmissionService>,
    /// Approval and relocation
    pub moderation_service: Arc<ModerationService>,
    /// Target directory catalog
    pub catalog: Arc<DirectoryCatalog>,
    /// Settings store
    pub settings_service: Arc<SettingsService>,
}
