use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};

use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: Auth errors
/// - E2xxx: User errors
/// - E3xxx: Post/image errors
/// - E4xxx: Social graph errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Unauthorized,
    Forbidden,
    BadRequest,
    Conflict,

    // Auth (E1xxx)
    InvalidCredentials,
    EmailAlreadyExists,
    UsernameTaken,
    TokenExpired,
    TokenInvalid,
    PasswordTooWeak,

    // User (E2xxx)
    UserNotFound,

    // Post/image (E3xxx)
    PostNotFound,
    ImageUploadFailed,
    UnsupportedImageFormat,
    ImageNotFound,

    // Social graph (E4xxx)
    FriendshipAlreadyExists,
    CannotFriendSelf,
    AlreadyLiked,
    LikeNotFound,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Unauthorized => "E0004",
            Self::Forbidden => "E0005",
            Self::BadRequest => "E0006",
            Self::Conflict => "E0007",

            // Auth
            Self::InvalidCredentials => "E1001",
            Self::EmailAlreadyExists => "E1002",
            Self::UsernameTaken => "E1003",
            Self::TokenExpired => "E1004",
            Self::TokenInvalid => "E1005",
            Self::PasswordTooWeak => "E1006",

            // User
            Self::UserNotFound => "E2001",

            // Post/image
            Self::PostNotFound => "E3001",
            Self::ImageUploadFailed => "E3002",
            Self::UnsupportedImageFormat => "E3003",
            Self::ImageNotFound => "E3004",

            // Social graph
            Self::FriendshipAlreadyExists => "E4001",
            Self::CannotFriendSelf => "E4002",
            Self::AlreadyLiked => "E4003",
            Self::LikeNotFound => "E4004",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError | Self::BadRequest | Self::PasswordTooWeak
            | Self::CannotFriendSelf | Self::UnsupportedImageFormat
            | Self::ImageUploadFailed => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::UserNotFound | Self::PostNotFound
            | Self::ImageNotFound | Self::LikeNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::InvalidCredentials | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict | Self::EmailAlreadyExists | Self::UsernameTaken
            | Self::FriendshipAlreadyExists | Self::AlreadyLiked => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::Known { code, message, details } => {
                let status = code.status_code();
                let mut resp = ApiErrorResponse::new(code.code(), message);
                if let Some(d) = details {
                    resp = resp.with_details(d.clone());
                }
                (status, resp)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new("E0001", "internal server error"),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                match err {
                    diesel::result::Error::NotFound => (
                        StatusCode::NOT_FOUND,
                        ApiErrorResponse::new("E0003", "resource not found"),
                    ),
                    // The write already rolled back in full at the engine;
                    // report the constraint failure and nothing else.
                    diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => (
                        StatusCode::CONFLICT,
                        ApiErrorResponse::new("E0007", "resource already exists"),
                    ),
                    diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => (
                        StatusCode::NOT_FOUND,
                        ApiErrorResponse::new("E0003", "referenced resource not found"),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::new("E0001", "database error"),
                    ),
                }
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("E0002", msg),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_documented_statuses() {
        assert_eq!(ErrorCode::ValidationError.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::EmailAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::FriendshipAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::AlreadyLiked.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::CannotFriendSelf.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InternalError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_code_strings_are_unique() {
        let codes = [
            ErrorCode::InternalError,
            ErrorCode::ValidationError,
            ErrorCode::NotFound,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::BadRequest,
            ErrorCode::Conflict,
            ErrorCode::InvalidCredentials,
            ErrorCode::EmailAlreadyExists,
            ErrorCode::UsernameTaken,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PasswordTooWeak,
            ErrorCode::UserNotFound,
            ErrorCode::PostNotFound,
            ErrorCode::ImageUploadFailed,
            ErrorCode::UnsupportedImageFormat,
            ErrorCode::ImageNotFound,
            ErrorCode::FriendshipAlreadyExists,
            ErrorCode::CannotFriendSelf,
            ErrorCode::AlreadyLiked,
            ErrorCode::LikeNotFound,
        ];
        let mut seen = std::collections::HashSet::new();
        for c in codes {
            assert!(seen.insert(c.code()), "duplicate code {}", c.code());
        }
    }

    #[test]
    fn unique_violation_reports_conflict() {
        let err = AppError::Database(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        ));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn foreign_key_violation_reports_not_found() {
        let err = AppError::Database(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("bad reference".to_string()),
        ));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_row_reports_not_found() {
        let err = AppError::Database(diesel::result::Error::NotFound);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
