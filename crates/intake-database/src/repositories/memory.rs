//! In-memory repositories.
//!
//! Used by the test suites and by `database.provider = "memory"` for
//! single-process deployments. Contents do not survive a restart.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use intake_core::error::AppError;
use intake_core::result::AppResult;
use intake_core::types::pagination::{PageRequest, PageResponse};
use intake_entity::settings::Settings;
use intake_entity::upload::{CreateUpload, UploadRecord, UploadStatus};

use super::{SettingsRepository, UploadRepository};

/// Upload records held in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryUploadRepository {
    records: DashMap<Uuid, UploadRecord>,
}

impl MemoryUploadRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the repository holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn update<F>(&self, id: Uuid, apply: F) -> AppResult<UploadRecord>
    where
        F: FnOnce(&mut UploadRecord),
    {
        let mut entry = self
            .records
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Upload {id} not found")))?;
        apply(entry.value_mut());
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }
}

#[async_trait]
impl UploadRepository for MemoryUploadRepository {
    async fn create(&self, data: &CreateUpload) -> AppResult<UploadRecord> {
        if data.title.trim().is_empty() {
            return Err(AppError::database("Upload title must not be empty"));
        }

        let now = Utc::now();
        let record = UploadRecord {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            description: data.description.clone(),
            thumbnail_url: data.thumbnail_url.clone(),
            original_file_name: data.original_file_name.clone(),
            staged_file_path: data.staged_file_path.clone(),
            public_file_url: data.public_file_url.clone(),
            approved: false,
            submitted_by: data.submitted_by.clone(),
            relocated_at: None,
            relocation_error: None,
            created_at: now,
            updated_at: now,
        };
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UploadRecord>> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn list(
        &self,
        status: Option<UploadStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UploadRecord>> {
        let mut matching: Vec<UploadRecord> = self
            .records
            .iter()
            .filter(|r| status.is_none_or(|s| r.status() == s))
            .map(|r| r.clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> AppResult<UploadRecord> {
        self.update(id, |r| r.approved = approved)
    }

    async fn record_relocation(&self, id: Uuid, new_path: &str) -> AppResult<UploadRecord> {
        self.update(id, |r| {
            r.staged_file_path = new_path.to_string();
            r.public_file_url = None;
            r.relocated_at = Some(Utc::now());
            r.relocation_error = None;
        })
    }

    async fn record_relocation_error(&self, id: Uuid, error: &str) -> AppResult<UploadRecord> {
        self.update(id, |r| r.relocation_error = Some(error.to_string()))
    }
}

/// Settings held behind an async lock.
#[derive(Debug, Default)]
pub struct MemorySettingsRepository {
    settings: RwLock<Settings>,
}

impl MemorySettingsRepository {
    /// Create a repository with empty settings.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn get(&self) -> AppResult<Settings> {
        Ok(self.settings.read().await.clone())
    }

    async fn set(&self, settings: &Settings) -> AppResult<Settings> {
        *self.settings.write().await = settings.clone();
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_upload(title: &str) -> CreateUpload {
        CreateUpload {
            title: title.to_string(),
            description: String::new(),
            thumbnail_url: None,
            original_file_name: "img.png".into(),
            staged_file_path: "/srv/uploads/img.png".into(),
            public_file_url: Some("/uploads/img.png".into()),
            submitted_by: None,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let repo = MemoryUploadRepository::new();
        let rec = repo.create(&new_upload("Vacation Photo")).await.unwrap();
        assert!(!rec.approved);
        assert_eq!(rec.status(), UploadStatus::Pending);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let repo = MemoryUploadRepository::new();
        assert!(repo.create(&new_upload("  ")).await.is_err());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_set_approved_unknown_id() {
        let repo = MemoryUploadRepository::new();
        let err = repo.set_approved(Uuid::new_v4(), true).await.unwrap_err();
        assert_eq!(err.kind, intake_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_relocation_clears_url_and_error() {
        let repo = MemoryUploadRepository::new();
        let rec = repo.create(&new_upload("a")).await.unwrap();
        repo.record_relocation_error(rec.id, "cross-device link")
            .await
            .unwrap();

        let moved = repo
            .record_relocation(rec.id, "/srv/gallery/img.png")
            .await
            .unwrap();
        assert_eq!(moved.staged_file_path, "/srv/gallery/img.png");
        assert!(moved.public_file_url.is_none());
        assert!(moved.relocation_error.is_none());
        assert!(moved.is_relocated());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let repo = MemoryUploadRepository::new();
        for i in 0..5 {
            let rec = repo.create(&new_upload(&format!("u{i}"))).await.unwrap();
            if i % 2 == 0 {
                repo.set_approved(rec.id, true).await.unwrap();
            }
        }

        let approved = repo
            .list(Some(UploadStatus::Approved), &PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(approved.total_items, 3);
        assert_eq!(approved.items.len(), 2);
        assert_eq!(approved.total_pages, 2);

        let all = repo.list(None, &PageRequest::default()).await.unwrap();
        assert_eq!(all.total_items, 5);
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let repo = MemorySettingsRepository::new();
        assert_eq!(repo.get().await.unwrap(), Settings::default());

        let saved = Settings {
            target_base_directory: "media".into(),
        };
        repo.set(&saved).await.unwrap();
        assert_eq!(repo.get().await.unwrap(), saved);
    }
}
