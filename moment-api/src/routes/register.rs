use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use moment_shared::errors::{AppError, AppResult, ErrorCode};
use moment_shared::types::ApiResponse;

use crate::models::{NewUser, User};
use crate::schema::users;
use crate::services::auth_service;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub user_id: Uuid,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<RegisteredUser>>> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    auth_service::validate_username(&req.username)?;
    auth_service::validate_password(&req.password)?;

    let password_hash = auth_service::hash_password(&req.password)?;
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let email = req.email.to_lowercase();
    let username = req.username.trim().to_string();

    // Check if email already exists
    let email_taken: bool = users::table
        .filter(users::email.eq(&email))
        .count()
        .get_result::<i64>(&mut conn)
        .map(|c| c > 0)
        .unwrap_or(false);

    if email_taken {
        return Err(AppError::new(ErrorCode::EmailAlreadyExists, "email already registered"));
    }

    let name_taken: bool = users::table
        .filter(users::username.eq(&username))
        .count()
        .get_result::<i64>(&mut conn)
        .map(|c| c > 0)
        .unwrap_or(false);

    if name_taken {
        return Err(AppError::new(ErrorCode::UsernameTaken, "username is already taken"));
    }

    let new_user = NewUser {
        username,
        email,
        password_hash,
    };

    let user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .get_result(&mut conn)?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(Json(ApiResponse::ok_with_message(
        RegisteredUser { user_id: user.id },
        "user registered successfully",
    )))
}
