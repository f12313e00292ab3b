//! Shared test helpers for integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use intake_api::AppState;
use intake_core::config::{AppConfig, DatabaseProvider};
use intake_database::repositories::{MemorySettingsRepository, MemoryUploadRepository};
use intake_service::{
    DirectoryCatalog, ModerationService, SettingsService, SharedSecretGuard, SubmissionService,
};
use intake_storage::{LocalStorageProvider, TrustedRoot};

pub const SUBMISSION_TOKEN: &str = "form-secret";
pub const ADMIN_TOKEN: &str = "admin-secret";

const BOUNDARY: &str = "intake-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Canonical trusted root
    pub root: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.storage.trusted_root = dir.path().to_string_lossy().into_owned();
        config.auth.submission_token = SUBMISSION_TOKEN.to_string();
        config.auth.admin_token = ADMIN_TOKEN.to_string();

        let root = TrustedRoot::open(&config.storage.trusted_root)
            .await
            .expect("Failed to open trusted root");

        let uploads = Arc::new(MemoryUploadRepository::new());
        let settings = Arc::new(MemorySettingsRepository::new());
        let storage = Arc::new(LocalStorageProvider::new(root.clone()));

        let catalog = Arc::new(DirectoryCatalog::new(root.clone(), settings.clone()));
        let submission_service = Arc::new(SubmissionService::new(
            uploads.clone(),
            storage.clone(),
            Arc::new(SharedSecretGuard::new(SUBMISSION_TOKEN)),
            root.clone(),
            config.storage.clone(),
        ));
        let moderation_service = Arc::new(ModerationService::new(
            uploads,
            storage.clone(),
            catalog.clone(),
        ));
        let settings_service = Arc::new(SettingsService::new(settings));

        let state = AppState {
            config: Arc::new(config),
            started_at: Instant::now(),
            storage,
            database: None,
            admin_guard: Arc::new(SharedSecretGuard::new(ADMIN_TOKEN)),
            submission_service,
            moderation_service,
            catalog,
            settings_service,
        };

        Self {
            router: intake_api::build_app(state),
            root: root.path().to_path_buf(),
            _dir: dir,
        }
    }

    /// Create directories beneath the trusted root
    pub fn mkdirs(&self, dirs: &[&str]) {
        for d in dirs {
            std::fs::create_dir_all(self.root.join(d)).expect("Failed to create directory");
        }
    }

    /// Path beneath the trusted root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Admin request with the configured credential
    pub async fn admin(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, Some(ADMIN_TOKEN)).await
    }

    /// Submit the upload form as multipart
    pub async fn submit(&self, fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/uploads")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("X-Intake-User", "alice")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Submit a valid form with the given title and file
    pub async fn submit_file(&self, title: &str, file_name: &str, data: &[u8]) -> TestResponse {
        self.submit(
            &[
                ("title", title),
                ("description", "<p>Beach at <em>sunset</em></p>"),
                ("thumbnail_url", "https://example.com/thumb.png"),
                ("authorization_token", SUBMISSION_TOKEN),
            ],
            Some((file_name, data)),
        )
        .await
    }

    /// Point the settings at a base directory
    pub async fn set_base(&self, base: &str) {
        let response = self
            .admin(
                "PUT",
                "/api/admin/settings",
                Some(serde_json::json!({ "target_base_directory": base })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success response
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `message` of an error response
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// Whether a file exists at the path
pub fn exists(path: &Path) -> bool {
    path.is_file()
}
