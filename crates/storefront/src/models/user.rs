//! User domain type.

use chrono::{DateTime, Utc};

use argenta_core::{Email, Role, UserId};

/// A registered account (domain type).
///
/// The password hash never leaves the repository layer; handlers and
/// responses only see this type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name, trimmed at registration.
    pub name: String,
    /// Normalized (trimmed, lowercased) email address.
    pub email: Email,
    /// Account role; registration always starts at `Role::User`.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
