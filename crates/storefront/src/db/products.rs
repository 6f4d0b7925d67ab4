//! `PostgreSQL` product repository.
//!
//! Backed by the `storefront.product` table. Identifiers come from its
//! `SERIAL` sequence, which never hands out a value twice.

use boutique_core::{NewProduct, Product, ProductId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::{ProductRepository, RepositoryError};

const PRODUCT_COLUMNS: &str = "id, name, price, collection, sizes, colors, images, description";

/// Row shape of `storefront.product`.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    collection: String,
    sizes: Vec<String>,
    colors: Vec<String>,
    images: Vec<String>,
    description: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        if row.price.is_sign_negative() {
            return Err(RepositoryError::DataCorruption(format!(
                "negative price {} for product {}",
                row.price, row.id
            )));
        }

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            collection: row.collection,
            sizes: row.sizes,
            colors: row.colors,
            images: row.images,
            description: row.description,
        })
    }
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a trivial query to prove the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM storefront.product ORDER BY id");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM storefront.product WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO storefront.product
                (name, price, collection, sizes, colors, images, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.collection)
            .bind(&product.sizes)
            .bind(&product.colors)
            .bind(&product.images)
            .bind(&product.description)
            .fetch_one(&self.pool)
            .await?;

        debug!(id = row.id, "Created product");
        Product::try_from(row)
    }

    #[instrument(skip(self, product))]
    async fn update(&self, id: ProductId, product: NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            UPDATE storefront.product
            SET name = $2, price = $3, collection = $4, sizes = $5,
                colors = $6, images = $7, description = $8, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_i32())
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.collection)
            .bind(&product.sizes)
            .bind(&product.colors)
            .bind(&product.images)
            .bind(&product.description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        debug!("Updated product");
        Product::try_from(row)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.product WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!("Deleted product");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(price: Decimal) -> ProductRow {
        ProductRow {
            id: 5,
            name: "Linen Trousers".to_owned(),
            price,
            collection: "Casual Chic".to_owned(),
            sizes: vec!["M".to_owned()],
            colors: vec!["Beige".to_owned()],
            images: vec!["/products/trousers-1.jpg".to_owned()],
            description: String::new(),
        }
    }

    #[test]
    fn test_row_converts_to_product() {
        let product = Product::try_from(row(Decimal::new(6900, 2))).unwrap();
        assert_eq!(product.id, ProductId::new(5));
        assert_eq!(product.collection_slug(), "casual-chic");
    }

    #[test]
    fn test_negative_price_is_corruption() {
        let err = Product::try_from(row(Decimal::new(-1, 0)));
        assert!(matches!(err, Err(RepositoryError::DataCorruption(_))));
    }
}
