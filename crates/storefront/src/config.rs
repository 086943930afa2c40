//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ARGENTA_DATABASE_URL` - SQLite connection string (e.g. `sqlite://argenta.db`);
//!   falls back to the generic `DATABASE_URL`
//!
//! ## Optional
//! - `ARGENTA_HOST` - Bind address (default: 127.0.0.1)
//! - `ARGENTA_PORT` - Listen port (default: 3000)
//! - `ARGENTA_BASE_URL` - Public URL (default: `http://localhost:3000`);
//!   an https URL enables the Secure cookie flag
//! - `ARGENTA_UPLOAD_DIR` - Directory for uploaded images (default: public/uploads)
//! - `ARGENTA_ADMIN_EMAIL` - Account promoted to the admin role at startup
//! - `ARGENTA_STRICT_PRODUCT_LISTING` - Surface store errors on the public
//!   listing instead of returning an empty list (default: false)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// SQLite database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory where accepted image uploads are written
    pub upload_dir: PathBuf,
    /// Account promoted to the admin role at startup, if set
    pub admin_email: Option<String>,
    /// Surface store errors on the public listing instead of failing soft
    pub strict_product_listing: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ARGENTA_DATABASE_URL")?;
        let host = get_env_or_default("ARGENTA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ARGENTA_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("ARGENTA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ARGENTA_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("ARGENTA_BASE_URL", "http://localhost:3000");
        let upload_dir = PathBuf::from(get_env_or_default("ARGENTA_UPLOAD_DIR", "public/uploads"));
        let admin_email = get_optional_env("ARGENTA_ADMIN_EMAIL");
        let strict_product_listing =
            parse_bool("ARGENTA_STRICT_PRODUCT_LISTING", get_optional_env("ARGENTA_STRICT_PRODUCT_LISTING"))?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            upload_dir,
            admin_email,
            strict_product_listing,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the Secure flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a boolean flag; unset means false.
fn parse_bool(key: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => Err(ConfigError::InvalidEnvVar(
            key.to_owned(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}
