//! Terminal implementations of the storefront's UI ports.

#![allow(clippy::print_stdout)]

use std::cell::Cell;
use std::io::{self, BufRead, Write};

use bonprix_storefront::assistant::{
    ChatEntry, QUICK_START_PROMPTS, RevealSink, Sender, SpeechSynthesizer, Utterance,
};
use bonprix_storefront::cart::{BadgeView, CartView};
use bonprix_storefront::ui::{Dialogs, LinkOpener};

/// Alerts on stdout, confirmations on stdin.
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{message} [o/N] ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

/// Prints links for the user to open.
pub struct TerminalLinkOpener;

impl LinkOpener for TerminalLinkOpener {
    fn open(&self, url: &str) {
        println!("Ouvrez ce lien pour envoyer votre commande :\n{url}");
    }
}

/// No audio output in a terminal; utterances go to the log.
#[derive(Default)]
pub struct LoggingSynthesizer {
    speaking: Cell<bool>,
}

impl SpeechSynthesizer for LoggingSynthesizer {
    fn is_speaking(&self) -> bool {
        self.speaking.get()
    }

    fn cancel(&self) {
        self.speaking.set(false);
    }

    fn speak(&self, utterance: Utterance) {
        tracing::info!(lang = utterance.lang, text = %utterance.text, "Speaking");
        self.speaking.set(true);
    }
}

/// Types a reply out on stdout as it is revealed.
#[derive(Default)]
pub struct StdoutSink {
    printed: usize,
}

impl RevealSink for StdoutSink {
    fn show_text(&mut self, text: &str) {
        let new: String = text.chars().skip(self.printed).collect();
        self.printed += new.chars().count();
        print!("{new}");
        let _ = io::stdout().flush();
    }

    fn show_markup(&mut self, _markup: &str) {
        self.printed = 0;
        println!();
    }
}

/// Print the cart page.
pub fn render_cart(view: &CartView) {
    if view.empty_message_visible {
        println!("Votre panier est vide.");
        return;
    }

    for item in &view.items {
        println!(
            "[{}] {} x{}  {}  = {}",
            item.id, item.name, item.quantity, item.unit_price, item.subtotal
        );
    }
    println!("Total : {}", view.total);
}

/// Print the cart badge.
pub fn render_badge(badge: &BadgeView) {
    if badge.visible {
        println!("🛒 {}", badge.count);
    }
}

/// Print transcript rows that are not messages (buttons).
pub fn render_extras(entries: &[ChatEntry]) {
    for entry in entries {
        match entry {
            ChatEntry::Message(message) if message.sender == Sender::Assistant => {
                println!("🤖 {}", plain(&message.text));
            }
            ChatEntry::Message(_) => {}
            ChatEntry::QuickStart => {
                for (i, prompt) in QUICK_START_PROMPTS.iter().enumerate() {
                    println!("  /{} {}", i + 1, prompt.label);
                }
            }
            ChatEntry::LinkButtons(links) => {
                for link in links {
                    println!("  → {} ({})", link.label, link.url);
                }
            }
            ChatEntry::ContactButtons(buttons) => {
                for button in buttons {
                    println!("  💬 {} : {}", button.label, button.href);
                }
            }
        }
    }
}

/// Strip assistant markup and the raw bold markers of the welcome text.
fn plain(markup: &str) -> String {
    markup
        .replace("<strong>", "")
        .replace("</strong>", "")
        .replace("**", "")
        .replace("<br>", "\n")
}
