//! Schema migrations for the `uploads` and `settings` tables.

use sqlx::PgPool;
use tracing::info;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;

/// Apply pending migrations from `migrations/`.
pub(crate) async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(known = migrator.iter().count(), "Applying record store migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Record store schema up to date");
    Ok(())
}
