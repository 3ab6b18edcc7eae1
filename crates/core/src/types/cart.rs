//! Cart line items and the cart mapping.
//!
//! The cart is a flat mapping from product id to line item. Quantities are
//! always at least one: any operation that would bring a line to zero or
//! below removes it instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// One product entry in the cart, with the unit price captured when it was
/// first added.
///
/// The field names on the wire (`nom`, `prix`) are the format already
/// persisted in customers' browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "prix")]
    pub unit_price: Price,
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Result of [`Cart::adjust_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The product was not in the cart; nothing changed.
    Absent,
    /// The line now holds this quantity.
    Updated(u32),
    /// The quantity reached zero and the line was removed.
    Removed,
}

/// The user's pending selections, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ProductId, LineItem>", into = "BTreeMap<ProductId, LineItem>")]
pub struct Cart {
    lines: BTreeMap<ProductId, LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// the captured name and price are kept. Returns the new quantity.
    pub fn add(&mut self, id: ProductId, name: impl Into<String>, unit_price: Price) -> u32 {
        let line = self.lines.entry(id.clone()).or_insert_with(|| LineItem {
            id,
            name: name.into(),
            unit_price,
            quantity: 0,
        });
        line.quantity = line.quantity.saturating_add(1);
        line.quantity
    }

    /// Add `delta` to an existing line's quantity, removing the line when
    /// the result is zero or below.
    pub fn adjust_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let Some(line) = self.lines.get_mut(id) else {
            return QuantityChange::Absent;
        };

        let next = i64::from(line.quantity).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(id);
            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Remove a line regardless of its quantity.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        self.lines.remove(id)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Look up a line.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.lines.get(id)
    }

    /// Iterate over lines in id order.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.values()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.values().map(LineItem::subtotal).sum()
    }

    /// Sum of quantities, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<BTreeMap<ProductId, LineItem>> for Cart {
    fn from(mut lines: BTreeMap<ProductId, LineItem>) -> Self {
        lines.retain(|_, line| line.quantity > 0);
        Self { lines }
    }
}

impl From<Cart> for BTreeMap<ProductId, LineItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
