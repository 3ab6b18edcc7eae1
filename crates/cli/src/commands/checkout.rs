//! Checkout command.
//!
//! Records the order with the store, then prints the WhatsApp link carrying
//! the order summary. Needs `BONPRIX_WHATSAPP_NUMBER`.

use bonprix_storefront::checkout::{self, CheckoutContext, CheckoutForm};
use bonprix_storefront::error::Result;
use bonprix_storefront::state::ClientState;

use crate::terminal::{TerminalDialogs, TerminalLinkOpener};

/// Submit the cart.
///
/// # Errors
///
/// Returns error if the cart is empty or no contact number is configured.
pub async fn run(state: &ClientState, client_name: String, client_quartier: String) -> Result<()> {
    let mut cart = state.cart();
    if !checkout::open_form(cart.cart(), &TerminalDialogs) {
        return Ok(());
    }

    let form = CheckoutForm {
        client_name,
        client_quartier,
    };
    let ctx = CheckoutContext {
        recorder: state.api(),
        opener: &TerminalLinkOpener,
        dialogs: &TerminalDialogs,
        contact: state.config().whatsapp_number.as_ref(),
    };

    let outcome = checkout::submit(&mut cart, &form, &ctx).await?;
    tracing::info!(recorded = outcome.recorded, "Checkout handed off to WhatsApp");
    Ok(())
}
