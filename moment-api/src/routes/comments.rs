use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use moment_shared::errors::{AppError, AppResult};
use moment_shared::types::ApiResponse;

use crate::models::{Comment, NewComment};
use crate::schema::comments;
use crate::AppState;

// --- POST /api/comments ---

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddCommentRequest>,
) -> AppResult<Json<ApiResponse<Comment>>> {
    let body = req.text.trim().to_string();
    if body.is_empty() {
        return Err(AppError::Validation("comment text is required".into()));
    }

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let new_comment = NewComment {
        post_id: req.post_id,
        user_id: req.user_id,
        body,
    };

    let comment = diesel::insert_into(comments::table)
        .values(&new_comment)
        .get_result::<Comment>(&mut conn)?;

    tracing::info!(comment_id = %comment.id, post_id = %comment.post_id, "comment added");

    Ok(Json(ApiResponse::ok(comment)))
}

// --- GET /api/posts/:post_id/comments ---

pub async fn get_post_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Comment>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let list = comments::table
        .filter(comments::post_id.eq(post_id))
        .order(comments::created_at.asc())
        .load::<Comment>(&mut conn)?;

    Ok(Json(ApiResponse::ok(list)))
}
