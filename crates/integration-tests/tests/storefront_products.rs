//! Integration tests for the product listing and the admin product API.

#![allow(clippy::indexing_slicing)]

use boutique_integration_tests::TestApp;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn scarf() -> Value {
    json!({
        "name": "Wool Scarf",
        "price": "35.00",
        "collection": "Winter",
        "colors": ["Grey", "Camel"]
    })
}

fn price(product: &Value) -> Decimal {
    product["price"]
        .as_str()
        .and_then(|p| p.parse().ok())
        .expect("price is a decimal string")
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_list_returns_demo_catalog_in_id_order() {
    let app = TestApp::spawn().await;

    let products = app.get_json("/api/products").await;
    let products = products.as_array().expect("product array");
    assert_eq!(products.len(), 3);

    let ids: Vec<i64> = products.iter().filter_map(|p| p["id"].as_i64()).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(products[0]["name"], "Polo Paris Regular Fit");
    assert_eq!(price(&products[1]), Decimal::new(29999, 2));
}

#[tokio::test]
async fn test_show_product() {
    let app = TestApp::spawn().await;

    let product = app.get_json("/api/products/3").await;
    assert_eq!(product["name"], "Casual Linen Shirt");
    assert_eq!(product["collection"], "Casual");
    assert_eq!(product["sizes"], json!(["S", "M", "L", "XL", "XXL"]));
}

#[tokio::test]
async fn test_show_missing_product_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/products/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: Value = response.json().await.expect("error body");
    assert_eq!(error["error"], "Not found: product 42");
}

#[tokio::test]
async fn test_empty_catalog() {
    let app = TestApp::spawn_with(Vec::new()).await;

    let products = app.get_json("/api/products").await;
    assert_eq!(products, json!([]));
}

// =============================================================================
// Admin CRUD
// =============================================================================

#[tokio::test]
async fn test_create_assigns_next_id_and_placeholder_image() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/api/products", &scarf()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = response.json().await.expect("product body");
    assert_eq!(created["id"], 4);
    assert_eq!(created["images"], json!(["/placeholder-image.jpg"]));
    assert_eq!(created["sizes"], json!([]));
    assert_eq!(price(&created), Decimal::new(3500, 2));

    let fetched = app.get_json("/api/products/4").await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_rejects_invalid_products() {
    let app = TestApp::spawn().await;

    let mut nameless = scarf();
    nameless["name"] = json!("");
    let response = app.post_json("/api/products", &nameless).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut negative = scarf();
    negative["price"] = json!("-1.00");
    let response = app.post_json("/api/products", &negative).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let products = app.get_json("/api/products").await;
    assert_eq!(products.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_create_without_required_field_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/products", &json!({ "name": "Belt", "collection": "Casual" }))
        .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_update_replaces_product() {
    let app = TestApp::spawn().await;

    let response = app.put_json("/api/products/2", &scarf()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let product = app.get_json("/api/products/2").await;
    assert_eq!(product["id"], 2);
    assert_eq!(product["name"], "Wool Scarf");
    assert_eq!(product["collection"], "Winter");
    assert_eq!(product["images"], json!(["/placeholder-image.jpg"]));
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.put_json("/api/products/99", &scarf()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_ids_are_not_reused() {
    let app = TestApp::spawn().await;

    let response = app.delete("/api/products/3").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get("/api/products/3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.delete("/api/products/3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let created: Value = app
        .post_json("/api/products", &scarf())
        .await
        .json()
        .await
        .expect("product body");
    assert_eq!(created["id"], 4);
}

#[tokio::test]
async fn test_cart_keeps_line_after_product_deleted() {
    let app = TestApp::spawn().await;

    app.post_json(
        "/api/cart/add",
        &json!({ "product_id": 1, "size": "S", "color": "Navy" }),
    )
    .await;
    app.delete("/api/products/1").await;

    let cart = app.get_json("/api/cart").await;
    assert_eq!(cart["item_count"], 1);
    assert_eq!(cart["formatted_total"], "€89.99");
}
