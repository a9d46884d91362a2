use axum::extract::{Query, State};
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use moment_shared::errors::{AppError, AppResult};
use moment_shared::types::auth::AuthUser;
use moment_shared::types::ApiResponse;

use crate::models::{User, UserProfile};
use crate::schema::users;
use crate::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    query: String,
}

/// GET /api/users/search?query=<text> - username substring match, caller excluded
pub async fn search_users(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<UserProfile>>>> {
    let query = params.query.trim().to_string();
    if query.len() < 2 {
        return Err(AppError::Validation("query must be at least 2 characters long".into()));
    }

    let pattern = format!("%{query}%");
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let results = users::table
        .filter(users::username.ilike(&pattern))
        .filter(users::id.ne(user.id))
        .load::<User>(&mut conn)?;

    Ok(Json(ApiResponse::ok(
        results.into_iter().map(UserProfile::from).collect(),
    )))
}
