use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use moment_shared::errors::{AppError, AppResult, ErrorCode};
use moment_shared::types::ApiResponse;

use crate::models::{Like, NewLike};
use crate::schema::likes;
use crate::AppState;

// --- POST /api/likes ---

#[derive(Debug, Deserialize)]
pub struct LikePostRequest {
    pub post_id: Uuid,
    pub user_id: Uuid,
}

/// One like per user per post; the composite primary key rejects a second.
pub async fn like_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LikePostRequest>,
) -> AppResult<Json<ApiResponse<Like>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let new_like = NewLike {
        post_id: req.post_id,
        user_id: req.user_id,
    };

    let like = diesel::insert_into(likes::table)
        .values(&new_like)
        .get_result::<Like>(&mut conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::new(ErrorCode::AlreadyLiked, "post already liked")
            }
            other => other.into(),
        })?;

    tracing::info!(post_id = %like.post_id, user_id = %like.user_id, "post liked");

    Ok(Json(ApiResponse::ok(like)))
}

// --- DELETE /api/likes/:post_id/:user_id ---

#[derive(Debug, Serialize)]
pub struct LikeRemovedResponse {
    pub removed: bool,
}

pub async fn unlike_post(
    State(state): State<Arc<AppState>>,
    Path((post_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<LikeRemovedResponse>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let affected = diesel::delete(
        likes::table
            .filter(likes::post_id.eq(post_id))
            .filter(likes::user_id.eq(user_id)),
    )
    .execute(&mut conn)?;

    if affected == 0 {
        return Err(AppError::new(ErrorCode::LikeNotFound, "like not found"));
    }

    tracing::info!(post_id = %post_id, user_id = %user_id, "like removed");

    Ok(Json(ApiResponse::ok(LikeRemovedResponse { removed: true })))
}

// --- GET /api/posts/:post_id/likes/count ---

#[derive(Debug, Serialize)]
pub struct LikesCountResponse {
    pub likes_count: i64,
}

pub async fn get_likes_count(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LikesCountResponse>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let likes_count: i64 = likes::table
        .filter(likes::post_id.eq(post_id))
        .count()
        .get_result(&mut conn)?;

    Ok(Json(ApiResponse::ok(LikesCountResponse { likes_count })))
}
