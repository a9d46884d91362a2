use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use moment_shared::errors::{AppError, AppResult};
use moment_shared::types::auth::AuthUser;
use moment_shared::types::ApiResponse;

use crate::models::{User, UserProfile};
use crate::schema::users;
use crate::AppState;

// --- GET /api/user ---

pub async fn get_user(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let record: User = users::table
        .find(user.id)
        .first(&mut conn)
        .map_err(|_| AppError::unauthorized("user for this token no longer exists"))?;

    Ok(Json(ApiResponse::ok(UserProfile::from(record))))
}
