//! Cart route handlers.
//!
//! The cart lives in the visitor's session under [`session_keys::CART`]. Each
//! handler loads it, applies a [`CartAction`], and writes the result back.
//! Concurrent requests from one session are last-writer-wins.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use boutique_core::{Cart, CartAction, LineItem, ProductId, format_currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;

/// Largest quantity a shopper can pick for one line.
pub const MAX_LINE_QUANTITY: i32 = 5;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub size: String,
    pub color: String,
    pub quantity: i32,
    pub image: String,
    pub unit_price: Decimal,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Decimal,
    pub formatted_total: String,
    pub item_count: i64,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            size: item.size.clone(),
            color: item.color.clone(),
            quantity: item.quantity,
            image: item.image.clone(),
            unit_price: item.unit_price,
            price: format_currency(item.unit_price),
            line_price: format_currency(item.line_total()),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total,
            formatted_total: format_currency(total),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: i64,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: Option<i32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, empty if none was saved yet.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Save the cart to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Load, transform and save the session cart.
async fn apply_action(session: &Session, action: CartAction) -> Result<Cart> {
    let cart = load_cart(session).await?.apply(action);
    save_cart(session, &cart).await?;
    Ok(cart)
}

fn check_quantity(quantity: i32) -> Result<()> {
    if (1..=MAX_LINE_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a product variant to the cart.
///
/// Adding a variant that is already in the cart increases its quantity.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = request.quantity.unwrap_or(1);
    check_quantity(quantity)?;

    let product = state
        .catalog()
        .get(request.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    if !product.offers_size(request.size.as_str()) {
        return Err(AppError::BadRequest(format!(
            "size {} is not available for {}",
            request.size, product.name
        )));
    }
    if !product.offers_color(request.color.as_str()) {
        return Err(AppError::BadRequest(format!(
            "color {} is not available for {}",
            request.color, product.name
        )));
    }

    let item = LineItem {
        quantity,
        ..product.line_item(&request.size, request.color.as_str())
    };
    let cart = apply_action(&session, CartAction::Add(item)).await?;

    add_breadcrumb(
        "cart",
        "Added item to cart",
        Some(&[
            ("product_id", product.id.to_string().as_str()),
            ("size", request.size.as_str()),
            ("color", request.color.as_str()),
        ]),
    );

    Ok(Json(CartView::from(&cart)))
}

/// Set the quantity of every line of a product.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    check_quantity(request.quantity)?;

    let cart = apply_action(
        &session,
        CartAction::UpdateQuantity {
            product_id: request.product_id,
            quantity: request.quantity,
        },
    )
    .await?;

    add_breadcrumb(
        "cart",
        "Updated cart quantity",
        Some(&[("product_id", request.product_id.to_string().as_str())]),
    );

    Ok(Json(CartView::from(&cart)))
}

/// Remove every line of a product, whatever its size and color.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let cart = apply_action(
        &session,
        CartAction::Remove {
            product_id: request.product_id,
        },
    )
    .await?;

    add_breadcrumb(
        "cart",
        "Removed item from cart",
        Some(&[("product_id", request.product_id.to_string().as_str())]),
    );

    Ok(Json(CartView::from(&cart)))
}

/// Get the cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.item_count(),
    }))
}

/// Hand the order off to WhatsApp.
///
/// An empty cart has nothing to order and goes back to the cart instead.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/api/cart").into_response());
    }

    add_breadcrumb(
        "checkout",
        "Order handed off",
        Some(&[("items", cart.item_count().to_string().as_str())]),
    );
    tracing::info!(
        lines = cart.len(),
        total = %cart.total(),
        "Redirecting to order handoff"
    );

    Ok(Redirect::to(&state.order_handoff().url(&cart)).into_response())
}

/// Redirect to the shop's WhatsApp chat.
pub async fn contact(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.order_handoff().contact_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(check_quantity(1).is_ok());
        assert!(check_quantity(MAX_LINE_QUANTITY).is_ok());
        assert!(check_quantity(0).is_err());
        assert!(check_quantity(-1).is_err());
        assert!(check_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_cart_view_formats_totals() {
        let item = LineItem {
            product_id: ProductId::new(1),
            name: "Polo Paris Regular Fit".to_owned(),
            unit_price: Decimal::new(8999, 2),
            size: "M".to_owned(),
            color: "Navy".to_owned(),
            quantity: 2,
            image: String::new(),
        };
        let cart = Cart::new().add_or_merge(item);

        let view = CartView::from(&cart);
        assert_eq!(view.total, Decimal::new(17998, 2));
        assert_eq!(view.formatted_total, "€179.98");
        assert_eq!(view.item_count, 2);
        assert_eq!(view.items.len(), 1);
        assert!(view.items.iter().all(|i| i.line_price == "€179.98" && i.price == "€89.99"));
    }
}
