//! Integration tests for collections, health checks and response headers.

#![allow(clippy::indexing_slicing)]

use boutique_integration_tests::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_collections_listing() {
    let app = TestApp::spawn().await;

    let collections = app.get_json("/api/collections").await;
    assert_eq!(
        collections,
        json!([
            { "slug": "casual", "title": "Collection", "product_count": 1 },
            { "slug": "evening", "title": "Collection", "product_count": 1 },
            { "slug": "summer", "title": "Summer Essentials", "product_count": 1 },
        ])
    );
}

#[tokio::test]
async fn test_collection_shows_its_products() {
    let app = TestApp::spawn().await;

    let collection = app.get_json("/api/collections/summer").await;
    assert_eq!(collection["slug"], "summer");
    assert_eq!(collection["title"], "Summer Essentials");

    let products = collection["products"].as_array().expect("product array");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Polo Paris Regular Fit");
}

#[tokio::test]
async fn test_unknown_collection_is_empty() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/collections/new-arrivals").await;
    assert_eq!(response.status(), StatusCode::OK);

    let collection: serde_json::Value = response.json().await.expect("collection body");
    assert_eq!(collection["title"], "New Arrivals");
    assert_eq!(collection["products"], json!([]));
}

#[tokio::test]
async fn test_created_product_joins_collection() {
    let app = TestApp::spawn().await;

    app.post_json(
        "/api/products",
        &json!({ "name": "Down Jacket", "price": "189.00", "collection": "Winter" }),
    )
    .await;

    let collection = app.get_json("/api/collections/winter").await;
    assert_eq!(collection["title"], "Winter Collection");
    assert_eq!(collection["products"][0]["name"], "Down Jacket");
}

#[tokio::test]
async fn test_health_checks() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "ok");

    let response = app.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/products").await;
    let headers = response.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["cache-control"], "no-store");
}
