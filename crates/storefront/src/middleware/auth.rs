//! The admin gate: authentication and authorization extractor.
//!
//! Two stages, in order and short-circuiting:
//!
//! 1. "authenticated" - the session must hold a user id, else the request
//!    is rejected as unauthenticated (401 for `/api/*`, redirect to
//!    `/login` for page routes).
//! 2. "authorized" - that user id is looked up in the database on every
//!    gated request, so a role change takes effect on the very next
//!    request. A missing user, a non-admin role, or a failed lookup all
//!    reject as forbidden (fail closed).

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use argenta_core::UserId;

use crate::db::users::UserRepository;
use crate::models::{User, session_keys};
use crate::state::AppState;

/// Extractor that requires an authenticated admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub User);

/// Error returned when the admin gate rejects a request.
pub enum AdminGateRejection {
    /// Redirect to login page (unauthenticated, HTML request).
    RedirectToLogin,
    /// 401 Unauthorized (unauthenticated, API request).
    Unauthenticated,
    /// 403 Forbidden (authenticated but not an admin, or lookup failed).
    Forbidden,
}

impl IntoResponse for AdminGateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not signed in").into_response()
            }
            Self::Forbidden => (StatusCode::FORBIDDEN, "Admin access required").into_response(),
        }
    }
}

/// Unauthenticated rejection appropriate to the request path.
fn reject_unauthenticated(parts: &Parts) -> AdminGateRejection {
    if parts.uri.path().starts_with("/api/") {
        AdminGateRejection::Unauthenticated
    } else {
        AdminGateRejection::RedirectToLogin
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminGateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| reject_unauthenticated(parts))?
            .clone();

        // Stage 1: is there a signed-in user at all?
        let user_id: UserId = session
            .get(session_keys::USER_ID)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| reject_unauthenticated(parts))?;

        // Stage 2: fresh role lookup. Never cached; a lookup failure is a
        // rejection, not a crash.
        let user = match UserRepository::new(state.pool()).get_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AdminGateRejection::Forbidden),
            Err(e) => {
                tracing::error!(error = %e, %user_id, "role lookup failed, failing closed");
                return Err(AdminGateRejection::Forbidden);
            }
        };

        if !user.role.is_admin() {
            return Err(AdminGateRejection::Forbidden);
        }

        Ok(Self(user))
    }
}

/// Helper to record the signed-in user in the session.
///
/// Logout needs no counterpart: flushing the session destroys the whole
/// record, user id included.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user_id: UserId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER_ID, user_id).await
}
