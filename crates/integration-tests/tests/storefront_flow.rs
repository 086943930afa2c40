//! End-to-end shop-owner flows and operational endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use argenta_integration_tests::{TestApp, product_form};

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::spawn().await;

    let health = app.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.text(), "ok");

    let ready = app.get("/health/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);
}

/// A shop owner registers with a messy email, signs in with the clean
/// form, and browses the still-empty shop.
#[tokio::test]
async fn owner_registration_and_first_visit() {
    let app = TestApp::spawn().await;

    let registered = app.register("Ana", " Ana@X.com ", "secret1").await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.json().get("email").unwrap(), "ana@x.com");

    let cookie = app.login("ana@x.com", "secret1").await;
    assert!(cookie.starts_with("argenta_session="));

    let listing = app.get("/api/products", None).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.json(), serde_json::json!([]));
}

/// Full path from empty shop to a product a visitor can see.
#[tokio::test]
async fn owner_stocks_the_shop() {
    let app = TestApp::spawn().await;
    let cookie = app
        .login_as_admin("Ana", "ana@x.com", "secret1")
        .await;

    let created = app
        .post_multipart(
            "/api/products",
            product_form("Hand-made mug", "24.50"),
            Some(&cookie),
        )
        .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);

    // A visitor without any session sees the product
    let listing = app.get("/api/products", None).await.json();
    let products = listing.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().unwrap().get("price").unwrap(), "24.50");
}

#[tokio::test]
async fn broken_store_fails_soft_on_the_listing_by_default() {
    let app = TestApp::spawn().await;

    sqlx::query("DROP TABLE products")
        .execute(app.pool())
        .await
        .unwrap();

    let listing = app.get("/api/products", None).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.json(), serde_json::json!([]));
}

#[tokio::test]
async fn broken_store_surfaces_in_strict_mode() {
    let app = TestApp::spawn_with(|config| config.strict_product_listing = true).await;

    sqlx::query("DROP TABLE products")
        .execute(app.pool())
        .await
        .unwrap();

    let listing = app.get("/api/products", None).await;
    assert_eq!(listing.status, StatusCode::INTERNAL_SERVER_ERROR);
}
