//! Unified error handling at the request boundary.
//!
//! Provides a unified `AppError` type covering the whole failure taxonomy.
//! All route handlers return `Result<T, AppError>`; nothing is retried and
//! no per-request failure crashes the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::uploads::UploadError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input; user-correctable.
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Login failure. Intentionally uninformative about the cause.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session user id on a gated route.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Session user missing, not an admin, or role lookup failed.
    #[error("forbidden")]
    Forbidden,

    /// Upload with a non-image content type.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Upload over the size limit.
    #[error("payload too large")]
    PayloadTooLarge,

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Unexpected store/filesystem failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(e) => Self::Validation(format!("invalid email: {e}")),
            AuthError::EmptyName => Self::Validation("name is required".to_owned()),
            AuthError::WeakPassword(msg) => Self::Validation(msg),
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::UserAlreadyExists => {
                Self::Conflict("an account with this email already exists".to_owned())
            }
            AuthError::Repository(e) => Self::Database(e),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_owned()),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedMediaType(ct) => Self::UnsupportedMediaType(ct),
            UploadError::TooLarge => Self::PayloadTooLarge,
            UploadError::Io(e) => Self::Internal(format!("upload write failed: {e}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures are logged for operators; clients get a
        // generic message.
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::InvalidCredentials => "Invalid credentials".to_owned(),
            Self::Unauthenticated => "Not signed in".to_owned(),
            Self::Forbidden => "Admin access required".to_owned(),
            Self::UnsupportedMediaType(_) => "Only image uploads are accepted".to_owned(),
            Self::PayloadTooLarge => "Image is too large (max 2 MiB)".to_owned(),
            Self::Validation(msg) | Self::Conflict(msg) => msg.clone(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
