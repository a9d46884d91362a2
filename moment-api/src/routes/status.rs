use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use moment_shared::errors::{AppError, AppResult, ErrorCode};
use moment_shared::types::ApiResponse;

use crate::schema::users;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdatedResponse {
    pub updated: bool,
}

// --- PUT /api/users/:user_id/status ---

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<StatusUpdatedResponse>>> {
    let status = match req.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => return Err(AppError::Validation("missing status field".into())),
    };

    if status.len() > 100 {
        return Err(AppError::Validation("status must be at most 100 characters".into()));
    }

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let affected = diesel::update(users::table.find(user_id))
        .set(users::status_message.eq(&status))
        .execute(&mut conn)?;

    if affected == 0 {
        return Err(AppError::new(ErrorCode::UserNotFound, "user not found"));
    }

    tracing::info!(user_id = %user_id, "status updated");

    Ok(Json(ApiResponse::ok(StatusUpdatedResponse { updated: true })))
}
