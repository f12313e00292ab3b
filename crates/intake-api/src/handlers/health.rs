//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use intake_core::traits::StorageProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let storage = state.storage.health_check().await.unwrap_or(false);

    let database = match &state.database {
        Some(pool) => match pool.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, "Record store health check failed");
                "unavailable"
            }
        },
        None => "memory",
    };
    let healthy = storage && database != "unavailable";

    Json(ApiResponse::ok(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        storage,
        database: database.to_string(),
    }))
}
