//! Cart engine.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s. Every operation borrows the
//! current cart and returns a new one; callers store whatever comes back (the
//! storefront keeps it in the visitor's session). Nothing here does I/O.
//!
//! # Identity
//!
//! Two line items are the same purchasable variant when their
//! `(product_id, size, color)` triple matches. [`Cart::add_or_merge`] never
//! lets two items share a triple.
//!
//! # Removal and quantity updates
//!
//! [`Cart::remove`] and [`Cart::update_quantity`] select items by
//! `product_id` alone, so they touch every size/color variant of that product
//! at once. Quantities are not bounds-checked: an update to zero or below
//! leaves the item in the cart, and it still counts toward the total. Input
//! policing belongs to whoever calls the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, format_currency};

/// Greeting that opens every order message.
const ORDER_GREETING: &str = "Hello! I would like to place an order:";

const fn default_quantity() -> i32 {
    1
}

/// One purchasable product variant in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub size: String,
    pub color: String,
    /// Defaults to 1 when absent from serialized input.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub image: String,
}

impl LineItem {
    /// Whether `other` is the same `(product_id, size, color)` variant.
    #[must_use]
    pub fn same_variant(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.size == other.size && self.color == other.color
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A state transition on a cart.
///
/// Handlers describe what the shopper did as a `CartAction` and run it through
/// [`Cart::apply`], which keeps cart mutations testable without any HTTP or
/// session machinery around them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Add a variant, merging with an existing line for the same variant.
    Add(LineItem),
    /// Remove every variant of a product.
    Remove { product_id: ProductId },
    /// Set the quantity of every variant of a product.
    UpdateQuantity { product_id: ProductId, quantity: i32 },
    /// Empty the cart.
    Clear,
}

/// An ordered sequence of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Wrap an existing sequence of items as-is.
    #[must_use]
    pub const fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a candidate, merging it into an existing line for the same variant.
    ///
    /// On a match the existing line's quantity grows by the candidate's
    /// quantity and keeps its position. Otherwise the candidate is appended.
    #[must_use]
    pub fn add_or_merge(&self, candidate: LineItem) -> Self {
        if !self.items.iter().any(|item| item.same_variant(&candidate)) {
            let mut items = self.items.clone();
            items.push(candidate);
            return Self { items };
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.same_variant(&candidate) {
                    LineItem {
                        // Quantities are unchecked here; saturate rather than overflow.
                        quantity: item.quantity.saturating_add(candidate.quantity),
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        Self { items }
    }

    /// Drop every line for `product_id`, whatever its size or color.
    #[must_use]
    pub fn remove(&self, product_id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.product_id != product_id)
                .cloned()
                .collect(),
        }
    }

    /// Set `quantity` on every line for `product_id`.
    ///
    /// Zero and negative quantities are stored as given.
    #[must_use]
    pub fn update_quantity(&self, product_id: ProductId, quantity: i32) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.product_id == product_id {
                        LineItem {
                            quantity,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    /// Sum of `unit_price × quantity` over all lines. Zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Percent-encoded order message, see [`compose_order_message`].
    #[must_use]
    pub fn order_message(&self) -> String {
        compose_order_message(self)
    }

    /// Run an action against this cart and return the resulting cart.
    #[must_use]
    pub fn apply(&self, action: CartAction) -> Self {
        match action {
            CartAction::Add(candidate) => self.add_or_merge(candidate),
            CartAction::Remove { product_id } => self.remove(product_id),
            CartAction::UpdateQuantity { product_id, quantity } => {
                self.update_quantity(product_id, quantity)
            }
            CartAction::Clear => Self::new(),
        }
    }
}

/// Build the order text for a cart and percent-encode it for a query string.
///
/// Before encoding the text reads:
///
/// ```text
/// Hello! I would like to place an order:
///
/// • Polo Paris Regular Fit
///   - Size: M
///   - Color: White
///   - Quantity: 2
///   - Price: €179.98
///
/// Total: €179.98
/// ```
///
/// Items appear in cart order, so equal carts always encode identically.
#[must_use]
pub fn compose_order_message(cart: &Cart) -> String {
    let lines = cart
        .items
        .iter()
        .map(|item| {
            format!(
                "• {}\n  - Size: {}\n  - Color: {}\n  - Quantity: {}\n  - Price: {}\n",
                item.name,
                item.size,
                item.color,
                item.quantity,
                format_currency(item.line_total()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let message = format!(
        "{ORDER_GREETING}\n\n{lines}\nTotal: {}",
        format_currency(cart.total())
    );

    urlencoding::encode(&message).into_owned()
}
