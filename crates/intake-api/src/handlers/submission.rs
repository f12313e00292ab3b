//! End-user submission handler.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use intake_core::error::AppError;
use intake_service::{FilePayload, SubmissionError, SubmissionReceipt, SubmissionRequest};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Caller;
use crate::state::AppState;

/// POST /api/uploads
///
/// Multipart fields: `title`, `description`, `thumbnail_url`,
/// `authorization_token`, and `file`.
pub async fn submit_upload(
    State(state): State<AppState>,
    caller: Caller,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<SubmissionReceipt>>)> {
    let limit = state.config.storage.max_upload_size_bytes;
    let read_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            SubmissionError::TooLarge { limit }
        } else {
            SubmissionError::Other(AppError::validation(format!("Multipart error: {e}")))
        }
    };

    let mut request = SubmissionRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(read_error)?;
                request.file = Some(FilePayload::new(file_name, data));
            }
            "title" => request.title = field.text().await.map_err(read_error)?,
            "description" => request.description = field.text().await.map_err(read_error)?,
            "thumbnail_url" => request.thumbnail_url = field.text().await.map_err(read_error)?,
            "authorization_token" => {
                request.authorization_token = field.text().await.map_err(read_error)?
            }
            _ => {}
        }
    }

    let receipt = state.submission_service.submit(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(receipt))))
}
