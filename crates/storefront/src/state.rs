//! Application state shared across handlers.

use std::sync::Arc;

use boutique_core::OrderHandoff;

use crate::config::StorefrontConfig;
use crate::db::CatalogStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product storage backend
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: CatalogStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the order handoff destination.
    #[must_use]
    pub fn order_handoff(&self) -> &OrderHandoff {
        &self.inner.config.order_handoff
    }
}
