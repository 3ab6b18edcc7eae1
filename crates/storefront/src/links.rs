//! Messaging deep links.

/// Base of WhatsApp click-to-chat links.
const WHATSAPP_BASE: &str = "https://wa.me";

/// Percent-encode text the way `encodeURIComponent` does.
///
/// Alphanumerics and `- _ . ! ~ * ' ( )` pass through; everything else is
/// UTF-8 percent-encoded.
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    // `urlencoding` escapes the five sub-delimiters that encodeURIComponent
    // keeps. A literal '%' in the input is always emitted as "%25", so these
    // sequences can only come from the escaped characters themselves.
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Build a click-to-chat link carrying a prefilled message.
///
/// `number` is in international format; a leading `+` is dropped.
#[must_use]
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let number = number.strip_prefix('+').unwrap_or(number);
    format!(
        "{WHATSAPP_BASE}/{number}?text={}",
        encode_uri_component(message)
    )
}
