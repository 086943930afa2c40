//! Domain models for the storefront.
//!
//! These types represent validated domain objects, separate from database
//! row types (which live inside the repository modules).

pub mod product;
pub mod user;

pub use product::Product;
pub use user::User;

/// Keys used for values stored in the session.
pub mod session_keys {
    /// The signed-in user's id. This is the only thing the session holds;
    /// the role is looked up fresh on every gated request.
    pub const USER_ID: &str = "user_id";
}
