//! Order handoff to a human operator over WhatsApp click-to-chat.
//!
//! The storefront never places orders itself. Checkout sends the shopper to a
//! `wa.me` link whose `text` parameter is the cart's encoded order message;
//! the conversation takes it from there.

use thiserror::Error;

use crate::cart::Cart;

/// Base of every click-to-chat link.
const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Errors building an [`OrderHandoff`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandoffError {
    /// The phone number is empty.
    #[error("phone number cannot be empty")]
    EmptyPhone,
    /// The phone number contains something other than ASCII digits.
    #[error("phone number must contain only digits in international format, got {0:?}")]
    InvalidPhone(String),
}

/// Destination for composed orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHandoff {
    phone: String,
}

impl OrderHandoff {
    /// Create a handoff to a phone number in international format without
    /// the leading `+` (e.g. `33651398493`).
    ///
    /// # Errors
    ///
    /// Returns `HandoffError` if the number is empty or not all digits.
    pub fn new(phone: &str) -> Result<Self, HandoffError> {
        if phone.is_empty() {
            return Err(HandoffError::EmptyPhone);
        }
        if !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(HandoffError::InvalidPhone(phone.to_owned()));
        }
        Ok(Self {
            phone: phone.to_owned(),
        })
    }

    /// The destination phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Link that opens a chat pre-filled with the cart's order message.
    #[must_use]
    pub fn url(&self, cart: &Cart) -> String {
        format!(
            "{WHATSAPP_BASE_URL}/{}?text={}",
            self.phone,
            cart.order_message()
        )
    }

    /// Link that opens an empty chat with the boutique.
    #[must_use]
    pub fn contact_url(&self) -> String {
        format!("{WHATSAPP_BASE_URL}/{}", self.phone)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::LineItem;
    use crate::types::ProductId;

    #[test]
    fn test_rejects_bad_numbers() {
        assert_eq!(OrderHandoff::new(""), Err(HandoffError::EmptyPhone));
        assert!(matches!(
            OrderHandoff::new("+33 6 51"),
            Err(HandoffError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_contact_url() {
        let handoff = OrderHandoff::new("33651398493").unwrap();
        assert_eq!(handoff.contact_url(), "https://wa.me/33651398493");
    }

    #[test]
    fn test_url_carries_encoded_message() {
        let handoff = OrderHandoff::new("33651398493").unwrap();
        let cart = Cart::from_items(vec![LineItem {
            product_id: ProductId::new(1),
            name: "Polo Paris Regular Fit".to_owned(),
            unit_price: Decimal::new(8999, 2),
            size: "M".to_owned(),
            color: "White".to_owned(),
            quantity: 1,
            image: String::new(),
        }]);

        let url = handoff.url(&cart);
        assert!(url.starts_with("https://wa.me/33651398493?text=Hello%21"));
        assert!(url.ends_with(&cart.order_message()));
        assert!(url.contains("Total%3A%20%E2%82%AC89.99"));
    }
}
