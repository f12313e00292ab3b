//! Target directory picker.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DirectoryOption};
use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// GET /api/admin/directories
pub async fn list_directories(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<DirectoryOption>>>> {
    let entries = state.catalog.list_configured().await?;
    let options = entries.into_iter().map(DirectoryOption::from).collect();
    Ok(Json(ApiResponse::ok(options)))
}
