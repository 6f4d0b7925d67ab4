//! Boutique Core - Shared types and the cart engine.
//!
//! This crate provides the pieces every Boutique component agrees on:
//! - `storefront` - Public-facing shop and admin catalog API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Cart operations take a cart and return a new one, which is
//! what makes them easy to test in isolation.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs and prices
//! - [`catalog`] - Products and collections
//! - [`cart`] - Line items, the cart engine, and order message composition
//! - [`order`] - WhatsApp order handoff links

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod types;

pub use cart::{Cart, CartAction, LineItem, compose_order_message};
pub use catalog::{NewProduct, Product};
pub use order::{HandoffError, OrderHandoff};
pub use types::*;
