//! Integration test harness for the Argenta storefront.
//!
//! Tests drive the complete router in process via
//! [`tower::ServiceExt::oneshot`] against an in-memory SQLite database
//! and a temporary upload directory, so no running server or external
//! database is needed.
//!
//! # Test Categories
//!
//! - `registration` - Account creation
//! - `auth` - Login, logout, and sessions
//! - `admin_gate` - The session + role gate on admin surfaces
//! - `products` - Product creation, uploads, and the public listing
//! - `storefront_flow` - End-to-end shop-owner scenarios and health checks

// Test support code; panicking on setup failure is the point.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use argenta_core::{Email, Role};
use argenta_storefront::config::StorefrontConfig;
use argenta_storefront::db::users::UserRepository;
use argenta_storefront::state::AppState;
use argenta_storefront::{db, middleware};

/// A fully wired storefront application backed by throwaway storage.
pub struct TestApp {
    router: Router,
    pool: SqlitePool,
    // Held so the directory outlives the test
    upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// Spawn an app with default configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn an app, letting the caller tweak the configuration first.
    pub async fn spawn_with(configure: impl FnOnce(&mut StorefrontConfig)) -> Self {
        // A single connection keeps every query on the same in-memory
        // database; a second connection would see an empty one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        db::run_migrations(&pool).await.unwrap();

        let upload_dir = tempfile::tempdir().unwrap();

        let mut config = StorefrontConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3000".to_owned(),
            upload_dir: upload_dir.path().to_path_buf(),
            admin_email: None,
            strict_product_listing: false,
        };
        configure(&mut config);

        let session_layer = middleware::create_session_layer(&pool, config.is_secure())
            .await
            .unwrap();

        let state = AppState::new(config, pool.clone());
        let router = argenta_storefront::app(state, session_layer);

        Self {
            router,
            pool,
            upload_dir,
        }
    }

    /// The database pool, for tests that inspect or corrupt state directly.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Path of a stored upload.
    #[must_use]
    pub fn upload_path(&self, filename: &str) -> PathBuf {
        self.upload_dir.path().join(filename)
    }

    /// The upload directory root.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Send one request through the router.
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET` a path, optionally presenting a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// `POST` a JSON body, optionally presenting a session cookie.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = Body::from(serde_json::to_vec(body).unwrap());
        self.request(builder.body(body).unwrap()).await
    }

    /// `POST` a multipart form, optionally presenting a session cookie.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: MultipartForm,
        cookie: Option<&str>,
    ) -> TestResponse {
        let (content_type, body) = form.finish();

        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// Register an account through the API.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/users",
            &serde_json::json!({ "name": name, "email": email, "password": password }),
            None,
        )
        .await
    }

    /// Log in through the API and return the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed: {response:?}");
        response.session_cookie().expect("login set no cookie")
    }

    /// Grant the admin role directly, the way startup promotion does.
    pub async fn promote_to_admin(&self, email: &str) {
        let email = Email::parse(email).unwrap();
        let updated = UserRepository::new(&self.pool)
            .set_role_by_email(&email, Role::Admin)
            .await
            .unwrap();
        assert!(updated, "no account to promote for {email}");
    }

    /// Register, promote, and log in an admin; returns the session cookie.
    pub async fn login_as_admin(&self, name: &str, email: &str, password: &str) -> String {
        let response = self.register(name, email, password).await;
        assert_eq!(response.status, StatusCode::CREATED);

        self.promote_to_admin(email).await;
        self.login(email, password).await
    }
}

/// A buffered response: status, headers, and the collected body.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({e}): {:?}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// The body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The session cookie from `Set-Cookie`, in `name=value` form.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        let value = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        value.split(';').next().map(ToOwned::to_owned)
    }

    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION)?.to_str().ok()
    }
}

const MULTIPART_BOUNDARY: &str = "------------argenta-test-boundary";

/// Builder for `multipart/form-data` request bodies.
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a file field.
    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Close the form. Returns the `Content-Type` header value and the body.
    #[must_use]
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        (
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            self.body,
        )
    }
}

/// A valid product-creation form with a small fake PNG attached.
#[must_use]
pub fn product_form(name: &str, price: &str) -> MultipartForm {
    MultipartForm::new()
        .text("name", name)
        .text("price", price)
        .file("image", "product.png", "image/png", &fake_png(1024))
}

/// PNG-magic-prefixed filler bytes of the given total length.
#[must_use]
pub fn fake_png(len: usize) -> Vec<u8> {
    let total = len.max(8);
    let mut data = Vec::with_capacity(total);
    data.extend_from_slice(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    data.resize(total, 0);
    data
}
