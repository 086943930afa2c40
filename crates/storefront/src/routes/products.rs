//! Product route handlers: public listing and admin-gated creation.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Serialize;

use argenta_core::{Price, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Listing item for `GET /api/products`.
#[derive(Debug, Serialize)]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl From<Product> for ProductListItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
        }
    }
}

/// Handle `GET /api/products`.
///
/// Public, no authentication. Newest products first. A store error
/// returns an empty list by default (fail-soft, matching the page's
/// lenient-read policy); set `ARGENTA_STRICT_PRODUCT_LISTING` to surface
/// it as a 500 instead.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductListItem>>> {
    match ProductRepository::new(state.pool()).list_newest_first().await {
        Ok(products) => Ok(Json(products.into_iter().map(Into::into).collect())),
        Err(e) if state.config().strict_product_listing => Err(e.into()),
        Err(e) => {
            tracing::error!(error = %e, "product listing failed, returning empty list");
            Ok(Json(Vec::new()))
        }
    }
}

/// Map a multipart read failure to the right error class.
///
/// A body over the router's size limit surfaces here as a 413 from the
/// multipart parser and must stay 413; everything else is a malformed
/// request.
fn multipart_error(context: &str, e: &MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

/// One file field collected from the multipart body.
struct PendingUpload {
    content_type: Option<String>,
    file_name: Option<String>,
    data: axum::body::Bytes,
}

/// Handle `POST /api/products`.
///
/// The admin gate runs before the body is touched. Expects multipart form
/// data with `name`, `price` and exactly one `image` file. Inputs are
/// validated before the file is persisted, so a validation failure leaves
/// neither a product row nor an orphan file.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut name: Option<String> = None;
    let mut price: Option<String> = None;
    let mut upload: Option<PendingUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("invalid multipart body", &e))?
    {
        match field.name() {
            Some("name") => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error("invalid name field", &e))?,
                );
            }
            Some("price") => {
                price = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error("invalid price field", &e))?,
                );
            }
            Some("image") => {
                let content_type = field.content_type().map(ToOwned::to_owned);
                let file_name = field.file_name().map(ToOwned::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("failed to read image field", &e))?;
                upload = Some(PendingUpload {
                    content_type,
                    file_name,
                    data,
                });
            }
            // Unknown fields are skipped
            _ => {}
        }
    }

    let name = name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("name is required".to_owned()))?
        .to_owned();

    let price = price
        .as_deref()
        .ok_or_else(|| AppError::Validation("price is required".to_owned()))?;
    let price =
        Price::parse(price).map_err(|e| AppError::Validation(format!("invalid price: {e}")))?;

    let upload = upload.ok_or_else(|| AppError::Validation("image file is required".to_owned()))?;

    // Upload handler runs after validation and before the row is written;
    // a rejection here means no product row.
    let image = state
        .uploads()
        .store(
            upload.content_type.as_deref(),
            upload.file_name.as_deref(),
            &upload.data,
        )
        .await?;

    let product = ProductRepository::new(state.pool())
        .create(&name, price, &image)
        .await?;

    tracing::info!(
        product_id = %product.id,
        admin_id = %admin.id,
        image = %product.image,
        "product created"
    );

    Ok(Redirect::to("/admin"))
}
