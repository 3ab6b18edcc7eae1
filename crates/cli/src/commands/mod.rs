//! CLI command implementations.

pub mod assistant;
pub mod cart;
pub mod checkout;
pub mod preferences;
