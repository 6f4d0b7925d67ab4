//! Integration tests for Boutique.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! Each test spawns its own storefront on an ephemeral port with an in-memory
//! catalog and session store, then talks to it over HTTP. No database needed.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Session cart and order handoff
//! - `storefront_products` - Product listing and admin CRUD
//! - `storefront_collections` - Collections and health checks

use std::net::{IpAddr, Ipv4Addr};

use boutique_core::catalog::demo_products;
use boutique_core::{NewProduct, OrderHandoff};
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::db::{CatalogStore, InMemoryProductRepository};
use boutique_storefront::state::AppState;
use reqwest::{Client, Response, redirect};
use serde_json::Value;
use tower_sessions::MemoryStore;

/// Phone number orders are handed off to in tests.
pub const TEST_ORDER_PHONE: &str = "33651398493";

/// A running storefront and a cookie-keeping client pointed at it.
pub struct TestApp {
    pub address: String,
    pub client: Client,
}

impl TestApp {
    /// Spawn a storefront seeded with the demo products.
    pub async fn spawn() -> Self {
        Self::spawn_with(demo_products()).await
    }

    /// Spawn a storefront seeded with `products`, numbered from 1.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the client cannot be built.
    pub async fn spawn_with(products: Vec<NewProduct>) -> Self {
        let catalog = CatalogStore::Memory(InMemoryProductRepository::seeded(products));
        let state = AppState::new(test_config(), catalog);
        let app = boutique_storefront::app(state, MemoryStore::default());

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read local address")
        );

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self { address, client }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// Fetch a path and parse the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> Value {
        self.get(path)
            .await
            .json()
            .await
            .expect("Response body was not JSON")
    }
}

/// Storefront configuration for a plain-HTTP local test server.
///
/// # Panics
///
/// Panics if [`TEST_ORDER_PHONE`] is not a valid phone number.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: None,
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost".to_owned(),
        order_handoff: OrderHandoff::new(TEST_ORDER_PHONE).expect("valid test phone"),
        seed_catalog: true,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}
