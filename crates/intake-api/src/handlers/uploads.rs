//! Admin upload moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use intake_core::error::AppError;
use intake_entity::upload::UploadStatus;
use intake_service::UploadView;

use crate::dto::request::{ApprovalRequest, StatusFilter};
use crate::dto::response::{ApiResponse, ApprovalResponse, PaginatedResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/uploads?page=&per_page=&status=
pub async fn list_uploads(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<StatusFilter>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<UploadView>>>> {
    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<UploadStatus>)
        .transpose()
        .map_err(AppError::validation)?;

    let page = state
        .moderation_service
        .list_uploads(status, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/admin/uploads/{id}
pub async fn get_upload(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<UploadView>>> {
    let view = state.moderation_service.get_upload(id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/admin/uploads/{id}/approval
pub async fn set_approval(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ApprovalRequest>,
) -> ApiResult<Json<ApiResponse<ApprovalResponse>>> {
    let approved = req.approved()?;
    let outcome = state
        .moderation_service
        .set_approval(&admin, id, approved, req.target())
        .await?;
    let upload = state.moderation_service.get_upload(id).await?;

    Ok(Json(ApiResponse::ok(ApprovalResponse { outcome, upload })))
}
