//! Bon Coin Bon Prix Core - Shared domain types.
//!
//! This crate provides the types used across the storefront client:
//! - `storefront` - Cart store, checkout flow and assistant widget
//! - `cli` - Terminal front-end for the storefront client
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere, including from tests that have no document model.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, GNF prices, contact numbers,
//!   line items, the cart mapping and presentation themes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
