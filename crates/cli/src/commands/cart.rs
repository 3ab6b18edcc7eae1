//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! bonprix cart show
//! bonprix cart add 7 "Câble USB-C" 15000
//! bonprix cart adjust 7 -1
//! bonprix cart remove 7
//! ```

use std::sync::Arc;

use bonprix_core::{Cart, Price, ProductId, QuantityChange};
use bonprix_storefront::cart::{BadgeView, CartStore};
use bonprix_storefront::error::{ClientError, Result};
use bonprix_storefront::state::ClientState;
use bonprix_storefront::storage::FileStore;

use crate::terminal::{TerminalDialogs, render_badge, render_cart};

/// Load the cart with the badge re-rendered on every change.
fn open(state: &ClientState) -> CartStore<Arc<FileStore>> {
    let mut cart = state.cart();
    cart.subscribe(|cart: &Cart| render_badge(&BadgeView::from(cart)));
    cart
}

/// Print the cart page.
pub fn show(state: &ClientState) {
    render_cart(&state.cart().view());
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns error if the price is not a valid amount.
pub fn add(state: &ClientState, id: &str, name: &str, price: &str) -> Result<()> {
    let price = Price::parse(price)?;
    let mut cart = open(state);
    let quantity = cart.add_and_announce(ProductId::new(id), name, price, &TerminalDialogs);
    tracing::info!(product_id = id, quantity, "Added to cart");
    Ok(())
}

/// Change a line's quantity.
///
/// # Errors
///
/// Returns error if the product is not in the cart.
pub fn adjust(state: &ClientState, id: &str, delta: i64) -> Result<()> {
    let mut cart = open(state);
    match cart.adjust_quantity(&ProductId::new(id), delta) {
        QuantityChange::Absent => return Err(ClientError::NotInCart(id.to_owned())),
        QuantityChange::Updated(quantity) => tracing::info!(product_id = id, quantity, "Quantity updated"),
        QuantityChange::Removed => tracing::info!(product_id = id, "Line removed"),
    }
    render_cart(&cart.view());
    Ok(())
}

/// Remove a line after confirmation.
///
/// # Errors
///
/// Returns error if the product is not in the cart.
pub fn remove(state: &ClientState, id: &str) -> Result<()> {
    let id = ProductId::new(id);
    let mut cart = open(state);
    if cart.cart().get(&id).is_none() {
        return Err(ClientError::NotInCart(id.to_string()));
    }

    if cart.remove_confirmed(&id, &TerminalDialogs) {
        render_cart(&cart.view());
    }
    Ok(())
}
