//! Login and logout route handlers.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::set_current_user;
use crate::routes::users::UserResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Handle `POST /api/auth/login`.
///
/// An unknown email and a wrong password produce the identical response;
/// the cause must not leak. On success the session records the user id
/// and the response carries the session cookie.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let email = req
        .email
        .as_deref()
        .ok_or_else(|| AppError::Validation("email is required".to_owned()))?;
    let password = req
        .password
        .as_deref()
        .ok_or_else(|| AppError::Validation("password is required".to_owned()))?;

    let user = AuthService::new(state.pool()).login(email, password).await?;

    set_current_user(&session, user.id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to establish session: {e}")))?;

    tracing::info!(user_id = %user.id, "login succeeded");

    Ok(Json(UserResponse::from(user)))
}

/// Handle `POST /auth/logout`.
///
/// Destroys the whole session, signed-in user included. Best effort;
/// failures are logged, the client is redirected home either way.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session");
    }

    Redirect::to("/").into_response()
}
