//! Intake Server: file submission and moderation service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{EnvFilter, fmt};

use intake_api::AppState;
use intake_core::config::{AppConfig, DatabaseProvider};
use intake_core::error::AppError;
use intake_core::traits::StorageProvider;
use intake_database::DatabasePool;
use intake_database::repositories::{MemorySettingsRepository, MemoryUploadRepository};
use intake_database::{SettingsRepository, UploadRepository};
use intake_service::{
    DirectoryCatalog, ModerationService, SettingsService, SharedSecretGuard, SubmissionService,
};
use intake_storage::{LocalStorageProvider, TrustedRoot};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("INTAKE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Intake v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Trusted root ─────────────────────────────────────
    let root = TrustedRoot::open(&config.storage.trusted_root).await?;
    tracing::info!(root = %root.path().display(), "Trusted root ready");

    // ── Step 2: Record store ─────────────────────────────────────
    let (uploads, settings, db_pool) = open_record_store(&config).await?;

    // ── Step 3: Storage and guards ───────────────────────────────
    let storage: Arc<dyn StorageProvider> = Arc::new(LocalStorageProvider::new(root.clone()));
    let submission_guard = Arc::new(SharedSecretGuard::new(config.auth.submission_token.clone()));
    let admin_guard = Arc::new(SharedSecretGuard::new(config.auth.admin_token.clone()));

    // ── Step 4: Services ─────────────────────────────────────────
    let catalog = Arc::new(DirectoryCatalog::new(root.clone(), Arc::clone(&settings)));
    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&uploads),
        Arc::clone(&storage),
        submission_guard,
        root,
        config.storage.clone(),
    ));
    let moderation_service = Arc::new(ModerationService::new(
        Arc::clone(&uploads),
        Arc::clone(&storage),
        Arc::clone(&catalog),
    ));
    let settings_service = Arc::new(SettingsService::new(Arc::clone(&settings)));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        started_at: Instant::now(),
        storage,
        database: db_pool.clone(),
        admin_guard,
        submission_service,
        moderation_service,
        catalog,
        settings_service,
    };

    let app = intake_api::build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Intake server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Intake server shut down gracefully");
    Ok(())
}

type RecordStore = (
    Arc<dyn UploadRepository>,
    Arc<dyn SettingsRepository>,
    Option<DatabasePool>,
);

/// Connect the configured record store, running migrations for PostgreSQL.
async fn open_record_store(config: &AppConfig) -> Result<RecordStore, AppError> {
    match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::open(&config.database).await?;
            let uploads: Arc<dyn UploadRepository> = Arc::new(pool.uploads());
            let settings: Arc<dyn SettingsRepository> = Arc::new(pool.settings());
            Ok((uploads, settings, Some(pool)))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using the in-memory record store; uploads are lost on restart");
            let uploads: Arc<dyn UploadRepository> = Arc::new(MemoryUploadRepository::new());
            let settings: Arc<dyn SettingsRepository> = Arc::new(MemorySettingsRepository::new());
            Ok((uploads, settings, None))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
