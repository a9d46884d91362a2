use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use moment_shared::errors::{AppError, AppResult};
use moment_shared::types::ApiResponse;

use crate::models::{NewPost, Post};
use crate::schema::{friendships, posts};
use crate::AppState;

// --- POST /api/posts ---

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: Uuid,
    pub image_url: String,
    pub caption: Option<String>,
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<Json<ApiResponse<Post>>> {
    if req.image_url.trim().is_empty() {
        return Err(AppError::Validation("missing image_url field".into()));
    }

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let new_post = NewPost {
        user_id: req.user_id,
        image_path: req.image_url,
        caption: req.caption,
    };

    let post = diesel::insert_into(posts::table)
        .values(&new_post)
        .get_result::<Post>(&mut conn)?;

    tracing::info!(post_id = %post.id, user_id = %post.user_id, "post created");

    Ok(Json(ApiResponse::ok(post)))
}

// --- GET /api/users/:user_id/post ---

/// The user's newest post from the current UTC day, as a list of 0 or 1
/// entries (one post per day convention).
pub async fn get_today_post(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Post>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + chrono::Duration::days(1);

    let post = posts::table
        .filter(posts::user_id.eq(user_id))
        .filter(posts::created_at.ge(day_start))
        .filter(posts::created_at.lt(day_end))
        .order(posts::created_at.desc())
        .first::<Post>(&mut conn)
        .optional()?;

    Ok(Json(ApiResponse::ok(post.into_iter().collect())))
}

// --- GET /api/friends/:user_id/posts ---

/// Feed of everyone the user has added (outgoing edges), newest first.
pub async fn get_friends_posts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Post>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let feed = posts::table
        .inner_join(friendships::table.on(friendships::friend_id.eq(posts::user_id)))
        .filter(friendships::user_id.eq(user_id))
        .select(posts::all_columns)
        .order(posts::created_at.desc())
        .load::<Post>(&mut conn)?;

    Ok(Json(ApiResponse::ok(feed)))
}
