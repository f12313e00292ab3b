//! PostgreSQL settings repository.

use async_trait::async_trait;
use sqlx::PgPool;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_entity::settings::{Settings, TARGET_BASE_DIRECTORY_KEY};

use super::SettingsRepository;

/// Key-value settings stored in the `settings` table.
#[derive(Debug, Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get(&self) -> AppResult<Settings> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(TARGET_BASE_DIRECTORY_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to read settings", e)
                })?;

        Ok(Settings {
            target_base_directory: value.unwrap_or_default(),
        })
    }

    async fn set(&self, settings: &Settings) -> AppResult<Settings> {
        sqlx::query(
            "INSERT INTO settings (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(TARGET_BASE_DIRECTORY_KEY)
        .bind(&settings.target_base_directory)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save settings", e))?;

        Ok(settings.clone())
    }
}
