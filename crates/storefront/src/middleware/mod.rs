//! Request middleware: sessions and the admin gate.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, set_current_user};
pub use session::create_session_layer;
