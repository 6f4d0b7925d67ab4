//! Product route handlers.
//!
//! Reads are public. Create, update and delete are the admin surface; there is
//! no authentication in front of them, so deployments are expected to keep
//! these methods behind an internal proxy.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use boutique_core::{NewProduct, Product, ProductId};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// List every product in identifier order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().list().await?;
    Ok(Json(products))
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Create a product.
#[instrument(skip(state, product), fields(name = %product.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(product): Json<NewProduct>,
) -> Result<impl IntoResponse> {
    validate_new_product(&product)?;

    let created = state
        .catalog()
        .create(product.with_default_image())
        .await?;

    let id = created.id.to_string();
    add_breadcrumb("catalog", "Created product", Some(&[("product_id", id.as_str())]));
    tracing::info!(product_id = %created.id, "Product created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a product.
#[instrument(skip(state, product))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(product): Json<NewProduct>,
) -> Result<Json<Product>> {
    validate_new_product(&product)?;

    let updated = state
        .catalog()
        .update(id, product.with_default_image())
        .await?;

    add_breadcrumb(
        "catalog",
        "Updated product",
        Some(&[("product_id", id.to_string().as_str())]),
    );
    tracing::info!(product_id = %id, "Product updated");

    Ok(Json(updated))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    state.catalog().delete(id).await?;

    add_breadcrumb(
        "catalog",
        "Deleted product",
        Some(&[("product_id", id.to_string().as_str())]),
    );
    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Reject product bodies the catalog should never hold.
fn validate_new_product(product: &NewProduct) -> Result<()> {
    if product.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }
    if product.price.is_sign_negative() {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(name: &str, price: Decimal) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price,
            collection: "Summer".to_owned(),
            sizes: vec![],
            colors: vec![],
            images: vec![],
            description: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_free_product() {
        assert!(validate_new_product(&product("Gift Wrap", Decimal::ZERO)).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = validate_new_product(&product("   ", Decimal::ONE));
        assert!(matches!(err, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let err = validate_new_product(&product("Belt", Decimal::new(-500, 2)));
        assert!(matches!(err, Err(AppError::BadRequest(_))));
    }
}
