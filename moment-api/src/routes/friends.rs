use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use moment_shared::errors::{AppError, AppResult, ErrorCode};
use moment_shared::types::auth::AuthUser;
use moment_shared::types::ApiResponse;

use crate::models::{Friendship, NewFriendship, UserProfile};
use crate::schema::friendships;
use crate::services::friend_service;
use crate::AppState;

// --- POST /api/friends ---

#[derive(Debug, Deserialize)]
pub struct AddFriendRequest {
    pub user_id: Uuid,
    pub friend_id: Uuid,
}

/// Insert one directed edge. Existence of both users is left to the
/// foreign-key constraints; a duplicate pair trips the composite primary key.
pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddFriendRequest>,
) -> AppResult<Json<ApiResponse<Friendship>>> {
    if req.user_id == req.friend_id {
        return Err(AppError::new(ErrorCode::CannotFriendSelf, "cannot add yourself as a friend"));
    }

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let new_edge = NewFriendship {
        user_id: req.user_id,
        friend_id: req.friend_id,
    };

    let edge = diesel::insert_into(friendships::table)
        .values(&new_edge)
        .get_result::<Friendship>(&mut conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::new(ErrorCode::FriendshipAlreadyExists, "friendship already recorded")
            }
            other => other.into(),
        })?;

    tracing::info!(user_id = %edge.user_id, friend_id = %edge.friend_id, "friend added");

    Ok(Json(ApiResponse::ok(edge)))
}

// --- GET /api/friends/:user_id ---

pub async fn get_mutual_friends(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<UserProfile>>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let friends = friend_service::mutual_friends(&mut conn, user_id)?;

    Ok(Json(ApiResponse::ok(
        friends.into_iter().map(UserProfile::from).collect(),
    )))
}
