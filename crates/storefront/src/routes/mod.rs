//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog reachable)
//!
//! # Products
//! GET    /api/products         - Product listing
//! POST   /api/products         - Create product
//! GET    /api/products/:id     - Product detail
//! PUT    /api/products/:id     - Replace product
//! DELETE /api/products/:id     - Delete product
//!
//! # Collections
//! GET  /api/collections        - Collection listing
//! GET  /api/collections/:slug  - Collection detail
//!
//! # Cart (session)
//! GET  /api/cart               - Cart contents and total
//! POST /api/cart/add           - Add a variant, merging with an existing line
//! POST /api/cart/update        - Set quantity for a product
//! POST /api/cart/remove        - Remove a product (all variants)
//! GET  /api/cart/count         - Item count badge
//!
//! # Order handoff
//! GET  /checkout               - Redirect to WhatsApp with the order message
//! GET  /contact                - Redirect to the WhatsApp chat
//! ```

pub mod cart;
pub mod collections;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{slug}", get(collections::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/products", product_routes())
        .nest("/api/collections", collection_routes())
        .nest("/api/cart", cart_routes())
        // Order handoff redirects
        .route("/checkout", get(cart::checkout))
        .route("/contact", get(cart::contact))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
