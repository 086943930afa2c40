//! Integration tests for login, logout, and sessions.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use argenta_integration_tests::TestApp;

#[tokio::test]
async fn login_sets_session_cookie() {
    let app = TestApp::spawn().await;
    app.register("Ana", "ana@example.com", "secret1").await;

    let response = app
        .post_json(
            "/api/auth/login",
            &serde_json::json!({ "email": "ana@example.com", "password": "secret1" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json().get("email").unwrap(), "ana@example.com");

    let cookie = response.session_cookie().unwrap();
    assert!(cookie.starts_with("argenta_session="));
}

#[tokio::test]
async fn login_accepts_unnormalized_email() {
    let app = TestApp::spawn().await;
    app.register("Ana", " Ana@X.com ", "secret1").await;

    // Login normalizes the same way registration does
    let cookie = app.login(" ANA@x.COM ", "secret1").await;
    assert!(cookie.starts_with("argenta_session="));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Ana", "ana@example.com", "secret1").await;

    let wrong_password = app
        .post_json(
            "/api/auth/login",
            &serde_json::json!({ "email": "ana@example.com", "password": "wrong11" }),
            None,
        )
        .await;
    let unknown_email = app
        .post_json(
            "/api/auth/login",
            &serde_json::json!({ "email": "nobody@example.com", "password": "secret1" }),
            None,
        )
        .await;

    // Neither response may reveal which part was wrong
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert!(wrong_password.session_cookie().is_none());
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/auth/login",
            &serde_json::json!({ "email": "ana@example.com" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = TestApp::spawn().await;
    let cookie = app
        .login_as_admin("Ana", "ana@example.com", "secret1")
        .await;

    // Gate passes while signed in
    let before = app.get("/admin", Some(&cookie)).await;
    assert_eq!(before.status, StatusCode::OK);

    let logout = app
        .request(
            axum::http::Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(axum::http::header::COOKIE, &cookie)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(logout.status, StatusCode::SEE_OTHER);
    assert_eq!(logout.location(), Some("/"));

    // The old cookie no longer grants access
    let after = app.get("/admin", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::SEE_OTHER);
    assert_eq!(after.location(), Some("/login"));
}
