//! Admin page route handler.
//!
//! The full storefront pages are static assets rendered in the browser;
//! the server only ships this minimal gated upload form.

use axum::response::{Html, IntoResponse};

use crate::middleware::RequireAdmin;

/// Handle `GET /admin`.
///
/// The gate redirects unauthenticated browsers to `/login` and answers
/// 403 for signed-in non-admins.
pub async fn dashboard(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Argenta admin</title>
</head>
<body>
  <h1>New product</h1>
  <p>Signed in as {name}</p>
  <form action="/api/products" method="post" enctype="multipart/form-data">
    <label>Name <input name="name" required></label>
    <label>Price <input name="price" inputmode="decimal" required></label>
    <label>Image <input name="image" type="file" accept="image/*" required></label>
    <button type="submit">Create</button>
  </form>
  <form action="/auth/logout" method="post">
    <button type="submit">Sign out</button>
  </form>
</body>
</html>
"#,
        name = html_escape(&admin.name)
    ))
}

/// Minimal HTML escaping for the admin's display name.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
