//! Argenta storefront - minimal e-commerce site.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API plus a small admin page
//! - SQLite for accounts, products, and sessions
//! - tower-sessions cookie sessions backing the admin gate
//! - Uploaded product images written to a local directory and served
//!   back under `/uploads`

#![cfg_attr(not(test), forbid(unsafe_code))]

use argenta_core::{Email, Role};
use argenta_storefront::config::StorefrontConfig;
use argenta_storefront::db::users::UserRepository;
use argenta_storefront::state::AppState;
use argenta_storefront::{db, middleware};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "argenta_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Migrations applied");

    // Promote the configured admin account, if any
    if let Some(admin_email) = config.admin_email.clone() {
        promote_admin(&pool, &admin_email).await;
    }

    // Create session layer (manages its own sessions table)
    let session_layer = middleware::create_session_layer(&pool, config.is_secure())
        .await
        .expect("Failed to create session store");

    // Build application state and router
    let state = AppState::new(config.clone(), pool);
    let app = argenta_storefront::app(state, session_layer);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Grant the admin role to the configured account.
///
/// Registration always creates plain users; the only path to the admin
/// role is this startup promotion. A missing account is logged and
/// retried on next startup, so the variable can be set before the
/// account is registered.
async fn promote_admin(pool: &sqlx::SqlitePool, admin_email: &str) {
    let email = match Email::parse(admin_email) {
        Ok(email) => email,
        Err(e) => {
            tracing::error!(error = %e, "ARGENTA_ADMIN_EMAIL is not a valid email, skipping");
            return;
        }
    };

    match UserRepository::new(pool)
        .set_role_by_email(&email, Role::Admin)
        .await
    {
        Ok(true) => tracing::info!(email = %email, "admin account promoted"),
        Ok(false) => {
            tracing::warn!(email = %email, "admin account not registered yet, will retry on next startup");
        }
        Err(e) => tracing::error!(error = %e, "failed to promote admin account"),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
