//! Integration tests for the session + admin-role gate.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use argenta_integration_tests::{TestApp, product_form};

#[tokio::test]
async fn api_rejects_unauthenticated_with_401() {
    let app = TestApp::spawn().await;

    let response = app
        .post_multipart("/api/products", product_form("Ring", "19.99"), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_page_redirects_unauthenticated_to_login() {
    let app = TestApp::spawn().await;

    let response = app.get("/admin", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn authenticated_non_admin_gets_403() {
    let app = TestApp::spawn().await;
    app.register("Ana", "ana@example.com", "secret1").await;
    let cookie = app.login("ana@example.com", "secret1").await;

    // The session is valid, so this is a role failure, not an auth failure
    let api = app
        .post_multipart(
            "/api/products",
            product_form("Ring", "19.99"),
            Some(&cookie),
        )
        .await;
    assert_eq!(api.status, StatusCode::FORBIDDEN);

    let page = app.get("/admin", Some(&cookie)).await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_sees_the_upload_page() {
    let app = TestApp::spawn().await;
    let cookie = app
        .login_as_admin("Ana", "ana@example.com", "secret1")
        .await;

    let response = app.get("/admin", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    let page = response.text();
    assert!(page.contains("multipart/form-data"));
    assert!(page.contains("Ana"));
}

#[tokio::test]
async fn unauthenticated_check_runs_before_role_check() {
    let app = TestApp::spawn().await;

    // No session at all: 401 on the API even though the role check would
    // also fail
    let response = app
        .post_multipart("/api/products", product_form("Ring", "19.99"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gate_rechecks_the_role_on_every_request() {
    let app = TestApp::spawn().await;
    let cookie = app
        .login_as_admin("Ana", "ana@example.com", "secret1")
        .await;

    assert_eq!(app.get("/admin", Some(&cookie)).await.status, StatusCode::OK);

    // Demote the account mid-session; the live session must not help
    sqlx::query("UPDATE users SET role = 'user'")
        .execute(app.pool())
        .await
        .unwrap();

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn gate_fails_closed_when_the_account_is_gone() {
    let app = TestApp::spawn().await;
    let cookie = app
        .login_as_admin("Ana", "ana@example.com", "secret1")
        .await;

    sqlx::query("DELETE FROM users")
        .execute(app.pool())
        .await
        .unwrap();

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
