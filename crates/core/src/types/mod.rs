//! Core types for Bon Coin Bon Prix.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod contact;
pub mod id;
pub mod price;
pub mod theme;

pub use cart::{Cart, LineItem, QuantityChange};
pub use contact::{ContactNumber, ContactNumberError};
pub use id::*;
pub use price::{Price, PriceError};
pub use theme::Theme;
