use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use moment_shared::errors::{AppError, AppResult, ErrorCode};
use moment_shared::types::ApiResponse;

use crate::AppState;

// --- POST /api/upload/:user_id ---

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub image_url: String,
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<ImageUploadResponse>>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::new(ErrorCode::ImageUploadFailed, format!("failed to read multipart: {e}")))?
        .ok_or_else(|| AppError::new(ErrorCode::ImageUploadFailed, "no image file provided"))?;

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let ext = match content_type.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        _ => {
            return Err(AppError::new(
                ErrorCode::UnsupportedImageFormat,
                "unsupported image format, accepted: jpeg, png",
            ));
        }
    };

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::new(ErrorCode::ImageUploadFailed, format!("failed to read file data: {e}")))?;

    if data.is_empty() {
        return Err(AppError::new(ErrorCode::ImageUploadFailed, "empty image file"));
    }

    let image_url = state
        .images
        .save(user_id, ext, &data)
        .await
        .map_err(|e| AppError::new(ErrorCode::ImageUploadFailed, e))?;

    tracing::info!(user_id = %user_id, path = %image_url, "image uploaded");

    Ok(Json(ApiResponse::ok(ImageUploadResponse { image_url })))
}

// --- GET /images/*path ---

pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> AppResult<Response> {
    let stored = state
        .images
        .read(&path)
        .await
        .map_err(|e| AppError::internal(e))?;

    let (bytes, content_type) = stored
        .ok_or_else(|| AppError::new(ErrorCode::ImageNotFound, "image not found"))?;

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
