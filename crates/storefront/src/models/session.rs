//! Session-related types.
//!
//! The cart lives in the visitor's session and nowhere else; it is gone once
//! the session expires.

/// Session keys for shopper state.
pub mod keys {
    /// Key for the serialized `boutique_core::Cart`.
    pub const CART: &str = "cart";
}
