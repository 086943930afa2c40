//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (database ping)
//!
//! # Public API
//! POST /api/users           - Register an account
//! POST /api/auth/login      - Login, sets the session cookie
//! GET  /api/products        - Product listing, newest first
//!
//! # Admin (session + admin role, checked per request)
//! POST /api/products        - Create a product (multipart, one image)
//! GET  /admin               - Admin upload page
//!
//! # Session
//! POST /auth/logout         - Destroy the session
//!
//! # Static
//! /uploads/*                - Uploaded images (ServeDir, wired in lib.rs)
//! ```

pub mod admin;
pub mod auth;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .route("/auth/login", post(auth::login))
        .route("/products", get(products::list).post(products::create))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/auth/logout", post(auth::logout))
        .nest("/api", api_routes())
}
