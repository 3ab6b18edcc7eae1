//! Cart store.
//!
//! Wraps the pure [`Cart`] reducer with persistence and change
//! notification. Every mutation rewrites the `cart` storage key and notifies
//! the registered observers, which re-render the cart page and the badge.
//! Storage writes are best effort: a failed write is logged and the
//! in-memory cart stays authoritative.

use bonprix_core::{Cart, LineItem, Price, ProductId, QuantityChange};

use crate::error::add_breadcrumb;
use crate::storage::{KeyValueStore, keys};
use crate::ui::Dialogs;

pub mod view;

pub use view::{BadgeView, CartItemView, CartView};

/// Prompt shown before removing a line.
pub const REMOVE_CONFIRMATION: &str =
    "Voulez-vous vraiment supprimer cet article de votre panier ?";

/// Receives the cart after every committed mutation.
pub trait CartObserver: Send {
    fn on_cart_changed(&self, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: Fn(&Cart) + Send,
{
    fn on_cart_changed(&self, cart: &Cart) {
        self(cart);
    }
}

/// The cart, its persistence port and its observers.
pub struct CartStore<S> {
    store: S,
    cart: Cart,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Rehydrate the cart from `store`.
    ///
    /// An absent, unreadable or corrupt entry yields an empty cart.
    pub fn load(store: S) -> Self {
        let cart = match store.get(keys::CART) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored cart is corrupt, starting empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        };

        tracing::debug!(lines = cart.line_count(), "Cart loaded");

        Self {
            store,
            cart,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It is not called until the next mutation.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Add one unit of a product. Returns the line's new quantity.
    pub fn add(&mut self, id: ProductId, name: &str, unit_price: Price) -> u32 {
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
        let quantity = self.cart.add(id, name, unit_price);
        self.commit();
        quantity
    }

    /// Add one unit and tell the user about it.
    pub fn add_and_announce(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Price,
        dialogs: &dyn Dialogs,
    ) -> u32 {
        let quantity = self.add(id, name, unit_price);
        dialogs.alert(&format!("\"{name}\" ajouté au panier !"));
        quantity
    }

    /// Change a line's quantity by `delta`, removing it at zero.
    ///
    /// Absent ids are ignored without touching storage.
    pub fn adjust_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let change = self.cart.adjust_quantity(id, delta);
        if change != QuantityChange::Absent {
            let delta = delta.to_string();
            add_breadcrumb(
                "cart",
                "Adjusted quantity",
                Some(&[("product_id", id.as_str()), ("delta", delta.as_str())]),
            );
            self.commit();
        }
        change
    }

    /// Delete a line unconditionally.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
        let removed = self.cart.remove(id);
        self.commit();
        removed
    }

    /// Delete a line after the user confirms. Returns whether it was removed.
    pub fn remove_confirmed(&mut self, id: &ProductId, dialogs: &dyn Dialogs) -> bool {
        if !dialogs.confirm(REMOVE_CONFIRMATION) {
            return false;
        }
        self.remove(id);
        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    /// Build the cart page view model.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    /// Build the badge view model.
    #[must_use]
    pub fn badge(&self) -> BadgeView {
        BadgeView::from(&self.cart)
    }

    fn commit(&self) {
        match serde_json::to_string(&self.cart) {
            Ok(json) => {
                if let Err(e) = self.store.set(keys::CART, &json) {
                    tracing::error!(error = %e, "Failed to persist cart");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode cart"),
        }

        for observer in &self.observers {
            observer.on_cart_changed(&self.cart);
        }
    }
}
