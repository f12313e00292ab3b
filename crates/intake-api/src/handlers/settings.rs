//! Settings handlers.

use axum::Json;
use axum::extract::State;

use intake_entity::settings::Settings;

use crate::dto::request::SettingsRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/settings
pub async fn get_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Settings>>> {
    let settings = state.settings_service.get().await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<SettingsRequest>,
) -> ApiResult<Json<ApiResponse<Settings>>> {
    let settings = state
        .settings_service
        .set(&admin, &req.target_base_directory)
        .await?;
    Ok(Json(ApiResponse::ok(settings)))
}
