//! Application services.

pub mod auth;
pub mod uploads;
