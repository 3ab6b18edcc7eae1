//! Bon Coin Bon Prix storefront client.
//!
//! The client side of the shop as a library: a locally persisted cart,
//! checkout handed off to WhatsApp, and the Chérif assistant. Platform
//! concerns (dialogs, links, speech) sit behind traits so the same flows run
//! in the CLI, in a browser bridge and in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assistant;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod links;
pub mod preferences;
pub mod services;
pub mod state;
pub mod storage;
pub mod ui;
