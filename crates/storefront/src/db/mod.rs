//! Catalog storage.
//!
//! Handlers talk to the catalog through [`ProductRepository`]. Two backends
//! implement it:
//!
//! - [`InMemoryProductRepository`] - process-local, used when no database is
//!   configured and in tests
//! - [`PgProductRepository`] - `PostgreSQL` `storefront.product` table
//!
//! [`CatalogStore`] picks one at startup and is what `AppState` holds.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p boutique-cli -- migrate
//! ```

pub mod memory;
pub mod products;

use std::future::Future;
use std::time::Duration;

use boutique_core::{NewProduct, Product, ProductId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use memory::InMemoryProductRepository;
pub use products::PgProductRepository;

/// Errors from catalog storage.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create, read, update and delete products.
///
/// Identifiers are assigned by the store and never reused.
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by identifier.
    fn list(&self) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// A single product, or `None` if absent.
    fn get(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Store a new product under a freshly assigned identifier.
    fn create(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// Replace every field of an existing product.
    ///
    /// Fails with `RepositoryError::NotFound` if no product has that id.
    fn update(
        &self,
        id: ProductId,
        product: NewProduct,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// Delete a product.
    ///
    /// Fails with `RepositoryError::NotFound` if no product has that id.
    fn delete(&self, id: ProductId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// The catalog backend selected at startup.
#[derive(Debug, Clone)]
pub enum CatalogStore {
    Memory(InMemoryProductRepository),
    Postgres(PgProductRepository),
}

impl CatalogStore {
    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database does not answer.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Postgres(repo) => repo.ping().await,
        }
    }
}

impl ProductRepository for CatalogStore {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        match self {
            Self::Memory(repo) => repo.list().await,
            Self::Postgres(repo) => repo.list().await,
        }
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        match self {
            Self::Memory(repo) => repo.get(id).await,
            Self::Postgres(repo) => repo.get(id).await,
        }
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        match self {
            Self::Memory(repo) => repo.create(product).await,
            Self::Postgres(repo) => repo.create(product).await,
        }
    }

    async fn update(&self, id: ProductId, product: NewProduct) -> Result<Product, RepositoryError> {
        match self {
            Self::Memory(repo) => repo.update(id, product).await,
            Self::Postgres(repo) => repo.update(id, product).await,
        }
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(repo) => repo.delete(id).await,
            Self::Postgres(repo) => repo.delete(id).await,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
