//! Product domain type.

use chrono::{DateTime, Utc};

use argenta_core::{Price, ProductId};

/// A catalog product (domain type).
///
/// Products are created only through the admin-gated creation endpoint and
/// are never updated or deleted.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name, trimmed at creation.
    pub name: String,
    /// Strictly positive price.
    pub price: Price,
    /// Generated filename inside the upload directory.
    pub image: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
