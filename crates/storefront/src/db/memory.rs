//! Process-local product storage.
//!
//! Products live in a vector behind a `tokio` `RwLock`. Identifiers come from
//! a counter that only moves forward, so an id freed by a delete is never
//! handed out again.

use std::sync::Arc;

use boutique_core::{NewProduct, Product, ProductId};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{ProductRepository, RepositoryError};

#[derive(Debug)]
struct Catalog {
    products: Vec<Product>,
    next_id: i32,
}

impl Catalog {
    fn insert(&mut self, product: NewProduct) -> Result<Product, RepositoryError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Conflict("product identifiers exhausted".to_owned()))?;

        let product = Product::from_new(ProductId::new(id), product);
        self.products.push(product.clone());
        Ok(product)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

/// In-memory product repository.
///
/// Cheap to clone; clones share the same catalog.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    /// An empty catalog whose first product gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog {
                products: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// A catalog pre-filled with `products`, numbered from 1 in order.
    #[must_use]
    pub fn seeded(products: impl IntoIterator<Item = NewProduct>) -> Self {
        let products: Vec<Product> = (1..)
            .zip(products)
            .map(|(id, product)| Product::from_new(ProductId::new(id), product))
            .collect();
        let next_id = products.last().map_or(1, |p| p.id.as_i32() + 1);

        Self {
            catalog: Arc::new(RwLock::new(Catalog { products, next_id })),
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.catalog.read().await.products.clone())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let catalog = self.catalog.read().await;
        Ok(catalog.products.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = self.catalog.write().await.insert(product)?;
        debug!(id = %product.id, "Created product");
        Ok(product)
    }

    #[instrument(skip(self, product))]
    async fn update(&self, id: ProductId, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut catalog = self.catalog.write().await;
        let index = catalog.position(id).ok_or(RepositoryError::NotFound)?;

        let updated = Product::from_new(id, product);
        if let Some(slot) = catalog.products.get_mut(index) {
            slot.clone_from(&updated);
        }
        debug!("Updated product");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut catalog = self.catalog.write().await;
        let index = catalog.position(id).ok_or(RepositoryError::NotFound)?;
        catalog.products.remove(index);
        debug!("Deleted product");
        Ok(())
    }
}
