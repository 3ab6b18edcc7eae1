//! Cart display models.
//!
//! Rendering works from these plain structs so the cart page and badge can
//! be produced (and tested) without a document model. Prices are
//! pre-formatted in GNF.

use bonprix_core::{Cart, LineItem};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price with its suffix, e.g. `15 000 GNF / unité`.
    pub unit_price: String,
    pub subtotal: String,
}

/// Cart page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    pub line_count: usize,
    /// The checkout section (total and "order" button) is shown.
    pub checkout_visible: bool,
    /// The "your cart is empty" message is shown.
    pub empty_message_visible: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: format!("{} / unité", line.unit_price),
            subtotal: line.subtotal().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let line_count = cart.line_count();
        Self {
            items: cart.lines().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
            line_count,
            checkout_visible: line_count > 0,
            empty_message_visible: line_count == 0,
        }
    }
}

/// Cart icon badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub count: u64,
    pub visible: bool,
}

impl From<&Cart> for BadgeView {
    fn from(cart: &Cart) -> Self {
        let count = cart.item_count();
        Self {
            count,
            visible: count > 0,
        }
    }
}
