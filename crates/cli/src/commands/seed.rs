//! Seed the catalog with demo products.

use boutique_core::catalog::demo_products;
use boutique_storefront::db::{PgProductRepository, ProductRepository};
use tracing::info;

use super::{CommandError, connect};

/// Insert the demo products.
///
/// Skips an already populated catalog unless `force` is set. Every run with
/// `force` inserts fresh copies under new identifiers.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn demo_catalog(force: bool) -> Result<(), CommandError> {
    let repo = PgProductRepository::new(connect().await?);

    let existing = repo.list().await?.len();
    if existing > 0 && !force {
        info!(existing, "Catalog already has products, skipping (use --force)");
        return Ok(());
    }

    for product in demo_products() {
        let created = repo.create(product.with_default_image()).await?;
        info!(id = %created.id, name = %created.name, "Inserted product");
    }

    info!("Seeding complete!");
    Ok(())
}
