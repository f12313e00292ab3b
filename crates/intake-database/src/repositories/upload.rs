//! PostgreSQL upload repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_core::types::pagination::{PageRequest, PageResponse};
use intake_entity::upload::{CreateUpload, UploadRecord, UploadStatus};

use super::UploadRepository;

/// Repository for upload records stored in the `uploads` table.
#[derive(Debug, Clone)]
pub struct PgUploadRepository {
    pool: PgPool,
}

impl PgUploadRepository {
    /// Create a new upload repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadRepository for PgUploadRepository {
    async fn create(&self, data: &CreateUpload) -> AppResult<UploadRecord> {
        sqlx::query_as::<_, UploadRecord>(
            "INSERT INTO uploads (id, title, description, thumbnail_url, original_file_name, \
             staged_file_path, public_file_url, submitted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.thumbnail_url)
        .bind(&data.original_file_name)
        .bind(&data.staged_file_path)
        .bind(&data.public_file_url)
        .bind(&data.submitted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create upload", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UploadRecord>> {
        sqlx::query_as::<_, UploadRecord>("SELECT * FROM uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find upload", e))
    }

    async fn list(
        &self,
        status: Option<UploadStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UploadRecord>> {
        let approved = status.map(|s| s.is_approved());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM uploads WHERE ($1::BOOLEAN IS NULL OR approved = $1)",
        )
        .bind(approved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count uploads", e))?;

        let items = sqlx::query_as::<_, UploadRecord>(
            "SELECT * FROM uploads WHERE ($1::BOOLEAN IS NULL OR approved = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(approved)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list uploads", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> AppResult<UploadRecord> {
        sqlx::query_as::<_, UploadRecord>(
            "UPDATE uploads SET approved = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update approval", e))?
        .ok_or_else(|| AppError::not_found(format!("Upload {id} not found")))
    }

    async fn record_relocation(&self, id: Uuid, new_path: &str) -> AppResult<UploadRecord> {
        sqlx::query_as::<_, UploadRecord>(
            "UPDATE uploads SET staged_file_path = $2, public_file_url = NULL, \
             relocated_at = NOW(), relocation_error = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record relocation", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Upload {id} not found")))
    }

    async fn record_relocation_error(&self, id: Uuid, error: &str) -> AppResult<UploadRecord> {
        sqlx::query_as::<_, UploadRecord>(
            "UPDATE uploads SET relocation_error = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(error)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record relocation error", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Upload {id} not found")))
    }
}
