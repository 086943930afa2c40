//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use argenta_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Database row for the `products` table.
///
/// Prices are stored as canonical decimal text; SQLite has no decimal
/// type and REAL would drift.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: String,
    image: String,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let amount: Decimal = self.price.parse().map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid price in database: {}", self.price))
        })?;
        let price = Price::from_decimal(amount).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("non-positive price in database: {amount}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price,
            image: self.image,
            created_at: self.created_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new product referencing an already-stored image file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        price: Price,
        image: &str,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, price, image, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, price, image, created_at
            ",
        )
        .bind(name)
        .bind(price.amount().to_string())
        .bind(image)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// List all products, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_newest_first(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, image, created_at
            FROM products
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
