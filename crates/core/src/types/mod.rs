//! Core types for the boutique.
//!
//! This module provides type-safe product identifiers and euro price display.

pub mod id;
pub mod price;

pub use id::*;
pub use price::format_currency;
