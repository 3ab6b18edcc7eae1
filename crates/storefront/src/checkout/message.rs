//! Order summary sent through the messaging channel.

use std::fmt::Write;

use bonprix_core::Cart;

use super::CheckoutForm;

/// Human-formatted order summary, before URL encoding.
///
/// The text uses WhatsApp markup (`*bold*`).
#[must_use]
pub fn order_summary(form: &CheckoutForm, cart: &Cart) -> String {
    let mut message = String::from("*COMMANDE EN LIGNE BON COIN BON PRIX*\n\n");
    let _ = writeln!(message, "👤 Client: {}", form.client_name);
    let _ = writeln!(message, "📍 Quartier/Ville: {}\n", form.client_quartier);
    message.push_str("--- DÉTAILS DE LA COMMANDE ---\n");

    for line in cart.lines() {
        let _ = writeln!(
            message,
            "* {}x {} (Prix Unitaire: {}, Sous-total: {})",
            line.quantity,
            line.name,
            line.unit_price,
            line.subtotal()
        );
    }

    let _ = write!(message, "\n*MONTANT TOTAL À PAYER: {}*", cart.total());
    message.push_str("\n\nMerci de confirmer la disponibilité et la livraison.");
    message
}
