//! Typing effect for assistant replies.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

#[allow(clippy::expect_used)]
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid regex"));

/// Where a reply is being drawn.
pub trait RevealSink {
    /// Replace the pending message with plain text.
    fn show_text(&mut self, text: &str);

    /// Replace the pending message with final markup.
    fn show_markup(&mut self, markup: &str);
}

/// Final markup for a reply: bold markers and line breaks.
#[must_use]
pub fn reply_markup(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>")
        .replace('\n', "<br>")
}

/// Reveal `text` one character per `delay`, then swap in the markup.
pub async fn reveal<K: RevealSink + ?Sized>(text: &str, sink: &mut K, delay: Duration) {
    let plain = text.replace('\n', " ");
    let mut shown = String::with_capacity(plain.len());

    for ch in plain.chars() {
        shown.push(ch);
        sink.show_text(&shown);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    sink.show_markup(&reply_markup(text));
}
