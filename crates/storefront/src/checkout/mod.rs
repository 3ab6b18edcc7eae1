//! Checkout: hand the cart over as a messaging order.
//!
//! Submitting runs two best-effort steps in order. The order is first
//! registered with the store's back office; a failure there is logged and
//! never blocks the customer. The formatted summary is then opened as a
//! WhatsApp link to the store's primary number, and the cart is cleared.
//! There is no rollback and no retry.

use bonprix_core::{Cart, ContactNumber, LineItem, Price};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::cart::CartStore;
use crate::error::add_breadcrumb;
use crate::links::whatsapp_link;
use crate::services::OrderRecorder;
use crate::storage::KeyValueStore;
use crate::ui::{Dialogs, LinkOpener};

pub mod message;

pub use message::order_summary;

/// Alert shown when opening the form with nothing in the cart.
pub const EMPTY_CART_FORM_ALERT: &str =
    "Votre panier est vide. Veuillez ajouter des articles avant de commander.";

/// Alert shown when submitting with a zero total.
pub const EMPTY_CART_SUBMIT_ALERT: &str = "Votre panier est vide. Impossible de commander.";

/// Alert shown when no contact number is configured.
pub const MISSING_CONTACT_ALERT: &str =
    "Erreur: Le numéro WhatsApp n'est pas configuré. Veuillez contacter l'administrateur.";

/// Errors that stop a checkout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart total is zero.
    #[error("cart is empty")]
    EmptyCart,

    /// No messaging number is configured for the handoff.
    #[error("no WhatsApp contact number configured")]
    MissingContact,
}

/// Customer details typed into the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub client_name: String,
    pub client_quartier: String,
}

/// Order registration payload for the back office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub client_name: String,
    pub client_quartier: String,
    pub grand_total: Price,
    pub items: Vec<LineItem>,
}

impl OrderRecord {
    /// Snapshot the cart for registration.
    #[must_use]
    pub fn new(form: &CheckoutForm, cart: &Cart) -> Self {
        Self {
            client_name: form.client_name.clone(),
            client_quartier: form.client_quartier.clone(),
            grand_total: cart.total(),
            items: cart.lines().cloned().collect(),
        }
    }
}

/// A completed handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// The link that was opened.
    pub whatsapp_url: String,
    /// Whether the back office accepted the order.
    pub recorded: bool,
}

/// Collaborators used by [`submit`].
pub struct CheckoutContext<'a, R> {
    pub recorder: &'a R,
    pub opener: &'a dyn LinkOpener,
    pub dialogs: &'a dyn Dialogs,
    /// Primary store number; `None` blocks the final handoff.
    pub contact: Option<&'a ContactNumber>,
}

/// Show the checkout form if there is something to order.
pub fn open_form(cart: &Cart, dialogs: &dyn Dialogs) -> bool {
    if cart.item_count() > 0 {
        return true;
    }
    dialogs.alert(EMPTY_CART_FORM_ALERT);
    false
}

/// Submit the checkout form.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] without any network call when the
/// total is zero, and [`CheckoutError::MissingContact`] (keeping the cart)
/// when no contact number is configured.
#[instrument(skip_all, fields(lines = cart.cart().line_count()))]
pub async fn submit<S, R>(
    cart: &mut CartStore<S>,
    form: &CheckoutForm,
    ctx: &CheckoutContext<'_, R>,
) -> Result<CheckoutOutcome, CheckoutError>
where
    S: KeyValueStore,
    R: OrderRecorder,
{
    if !cart.total().is_positive() {
        ctx.dialogs.alert(EMPTY_CART_SUBMIT_ALERT);
        return Err(CheckoutError::EmptyCart);
    }

    add_breadcrumb("checkout", "Submitted checkout", None);

    let record = OrderRecord::new(form, cart.cart());
    let recorded = match ctx.recorder.record_order(&record).await {
        Ok(()) => {
            tracing::info!(total = %record.grand_total, "Order recorded in back office");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to record order, continuing with WhatsApp handoff");
            false
        }
    };

    let summary = order_summary(form, cart.cart());

    let Some(number) = ctx.contact else {
        ctx.dialogs.alert(MISSING_CONTACT_ALERT);
        return Err(CheckoutError::MissingContact);
    };

    let whatsapp_url = whatsapp_link(number.as_str(), &summary);
    ctx.opener.open(&whatsapp_url);
    cart.clear();

    Ok(CheckoutOutcome {
        whatsapp_url,
        recorded,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    use bonprix_core::ProductId;

    use super::*;
    use crate::services::ApiError;
    use crate::storage::{MemoryStore, keys};

    #[derive(Default)]
    struct FakeRecorder {
        fail: bool,
        calls: RefCell<Vec<OrderRecord>>,
    }

    impl OrderRecorder for FakeRecorder {
        async fn record_order(&self, order: &OrderRecord) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(order.clone());
            if self.fail {
                Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct Recorded {
        alerts: RefCell<Vec<String>>,
        opened: RefCell<Vec<String>>,
        confirms: Cell<usize>,
    }

    impl Dialogs for Recorded {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_owned());
        }

        fn confirm(&self, _message: &str) -> bool {
            self.confirms.set(self.confirms.get() + 1);
            true
        }
    }

    impl LinkOpener for Recorded {
        fn open(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_owned());
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            client_name: "Mariama".to_string(),
            client_quartier: "Kaloum".to_string(),
        }
    }

    fn filled_cart(store: Arc<MemoryStore>) -> CartStore<Arc<MemoryStore>> {
        let mut cart = CartStore::load(store);
        cart.add(ProductId::new("7"), "Câble USB", Price::from_gnf(15000));
        cart.add(ProductId::new("7"), "Câble USB", Price::from_gnf(15000));
        cart
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_without_network() {
        let mut cart = CartStore::load(MemoryStore::new());
        let recorder = FakeRecorder::default();
        let ui = Recorded::default();
        let number = ContactNumber::parse("224621822134").unwrap();
        let ctx = CheckoutContext {
            recorder: &recorder,
            opener: &ui,
            dialogs: &ui,
            contact: Some(&number),
        };

        let result = submit(&mut cart, &form(), &ctx).await;

        assert_eq!(result, Err(CheckoutError::EmptyCart));
        assert!(recorder.calls.borrow().is_empty());
        assert!(ui.opened.borrow().is_empty());
        assert_eq!(ui.alerts.borrow().as_slice(), [EMPTY_CART_SUBMIT_ALERT]);
    }

    #[tokio::test]
    async fn test_successful_checkout_opens_link_and_clears_cart() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = filled_cart(Arc::clone(&store));
        let recorder = FakeRecorder::default();
        let ui = Recorded::default();
        let number = ContactNumber::parse("+224621822134").unwrap();
        let ctx = CheckoutContext {
            recorder: &recorder,
            opener: &ui,
            dialogs: &ui,
            contact: Some(&number),
        };

        let outcome = submit(&mut cart, &form(), &ctx).await.unwrap();

        assert!(outcome.recorded);
        assert!(outcome.whatsapp_url.starts_with("https://wa.me/224621822134?text="));
        assert_eq!(ui.opened.borrow().as_slice(), [outcome.whatsapp_url.clone()]);
        assert!(cart.cart().is_empty());
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("{}"));

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].grand_total, Price::from_gnf(30000));
        assert_eq!(calls[0].items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_recording_failure_does_not_block_handoff() {
        let mut cart = filled_cart(Arc::new(MemoryStore::new()));
        let recorder = FakeRecorder {
            fail: true,
            ..FakeRecorder::default()
        };
        let ui = Recorded::default();
        let number = ContactNumber::parse("224621822134").unwrap();
        let ctx = CheckoutContext {
            recorder: &recorder,
            opener: &ui,
            dialogs: &ui,
            contact: Some(&number),
        };

        let outcome = submit(&mut cart, &form(), &ctx).await.unwrap();

        assert!(!outcome.recorded);
        assert_eq!(ui.opened.borrow().len(), 1);
        assert!(ui.alerts.borrow().is_empty());
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_missing_contact_keeps_cart() {
        let mut cart = filled_cart(Arc::new(MemoryStore::new()));
        let recorder = FakeRecorder::default();
        let ui = Recorded::default();
        let ctx = CheckoutContext {
            recorder: &recorder,
            opener: &ui,
            dialogs: &ui,
            contact: None,
        };

        let result = submit(&mut cart, &form(), &ctx).await;

        assert_eq!(result, Err(CheckoutError::MissingContact));
        assert_eq!(recorder.calls.borrow().len(), 1);
        assert!(ui.opened.borrow().is_empty());
        assert_eq!(ui.alerts.borrow().as_slice(), [MISSING_CONTACT_ALERT]);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_open_form_requires_items() {
        let ui = Recorded::default();
        assert!(!open_form(&Cart::new(), &ui));
        assert_eq!(ui.alerts.borrow().as_slice(), [EMPTY_CART_FORM_ALERT]);

        let mut cart = Cart::new();
        cart.add(ProductId::new("1"), "A", Price::from_gnf(10));
        assert!(open_form(&cart, &ui));
    }

    #[test]
    fn test_order_record_wire_format() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("7"), "Câble USB", Price::from_gnf(15000));
        let json = serde_json::to_value(OrderRecord::new(&form(), &cart)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "clientName": "Mariama",
                "clientQuartier": "Kaloum",
                "grandTotal": 15000.0,
                "items": [{ "id": "7", "nom": "Câble USB", "prix": 15000.0, "quantity": 1 }]
            })
        );
    }
}
