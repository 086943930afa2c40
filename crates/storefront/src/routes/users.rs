//! Registration route handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use argenta_core::{Email, UserId};

use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
///
/// Fields are optional at the serde level so missing ones produce our own
/// 400 validation message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user. Never carries the password or its hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Handle `POST /api/users`.
///
/// Validates, normalizes, hashes, inserts - in that order. Duplicate
/// emails surface as 409.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let name = req
        .name
        .as_deref()
        .ok_or_else(|| AppError::Validation("name is required".to_owned()))?;
    let email = req
        .email
        .as_deref()
        .ok_or_else(|| AppError::Validation("email is required".to_owned()))?;
    let password = req
        .password
        .as_deref()
        .ok_or_else(|| AppError::Validation("password is required".to_owned()))?;

    let user = AuthService::new(state.pool())
        .register(name, email, password)
        .await?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
