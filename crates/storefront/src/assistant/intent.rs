//! Reply intents.
//!
//! Each reply maps to exactly one [`Intent`], and [`Intent::affordances`]
//! is the single place that decides which follow-ups the chat shows for it.

use std::time::Duration;

use super::{AssistantLink, AssistantReply, WhatsappContact};
use crate::links::whatsapp_link;

/// Intent tag for "take me to a page" replies.
pub const GUIDE_TO_PAGE: &str = "guide_vers_page";

/// Intent tag for unrecognised questions.
pub const DEFAULT: &str = "defaut";

/// Intent tag for customer-service problems.
pub const CUSTOMER_SERVICE_PROBLEM: &str = "service_client_probleme";

/// Delay between showing a redirect reply and navigating.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(1);

/// A canned question offered as a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickStartPrompt {
    pub label: &'static str,
    pub question: &'static str,
}

/// Quick-start prompts shown on welcome and after unanswered questions.
pub const QUICK_START_PROMPTS: [QuickStartPrompt; 4] = [
    QuickStartPrompt {
        label: "Conseil Téléphone 📱",
        question: "quel téléphone me conseilles-tu ?",
    },
    QuickStartPrompt {
        label: "Conseil Ordinateur 💻",
        question: "quel ordinateur est le meilleur ?",
    },
    QuickStartPrompt {
        label: "Info Livraison 🚚",
        question: "comment fonctionne la livraison ?",
    },
    QuickStartPrompt {
        label: "Prix d'un Produit 💰",
        question: "prix produit",
    },
];

/// What the server wants the widget to do with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Navigate away once the reply is shown.
    Redirect { url: String },
    /// Offer navigation shortcuts.
    GuideToPage { links: Vec<AssistantLink> },
    /// The assistant could not help: offer human contacts and prompts.
    DefaultOrProblem { contacts: Vec<WhatsappContact> },
    /// Plain answer; the tag, if any, is kept for logging.
    Other(Option<String>),
}

/// A follow-up shown under a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    Navigate { url: String, after: Duration },
    LinkButtons(Vec<AssistantLink>),
    ContactButtons(Vec<ContactButton>),
    QuickStart,
}

/// A button opening a WhatsApp chat with a support contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactButton {
    pub label: String,
    pub href: String,
}

impl ContactButton {
    /// Build a button whose chat is prefilled with the unanswered question.
    #[must_use]
    pub fn new(contact: &WhatsappContact, question: &str) -> Self {
        let text =
            format!("Bonjour, j'ai une question non résolue par l'assistant : \"{question}\"");
        Self {
            label: format!("Contacter {}", contact.label),
            href: whatsapp_link(&contact.number, &text),
        }
    }
}

impl Intent {
    /// Classify a reply. A non-empty redirect wins over any intent tag.
    #[must_use]
    pub fn from_reply(reply: &AssistantReply) -> Self {
        if let Some(url) = reply.redirect.as_ref().filter(|u| !u.is_empty()) {
            return Self::Redirect { url: url.clone() };
        }

        match reply.intent.as_deref() {
            Some(GUIDE_TO_PAGE) => Self::GuideToPage {
                links: reply.assistant_links.clone(),
            },
            Some(DEFAULT | CUSTOMER_SERVICE_PROBLEM) => Self::DefaultOrProblem {
                contacts: reply.contact_wa.clone(),
            },
            other => Self::Other(other.map(str::to_owned)),
        }
    }

    /// Follow-ups for this intent, in display order.
    ///
    /// `question` is the user's last question, quoted in contact messages.
    #[must_use]
    pub fn affordances(&self, question: &str) -> Vec<Affordance> {
        match self {
            Self::Redirect { url } => vec![Affordance::Navigate {
                url: url.clone(),
                after: REDIRECT_DELAY,
            }],
            Self::GuideToPage { links } if !links.is_empty() => {
                vec![Affordance::LinkButtons(links.clone())]
            }
            Self::DefaultOrProblem { contacts } => {
                let mut out = Vec::with_capacity(2);
                if !contacts.is_empty() {
                    out.push(Affordance::ContactButtons(
                        contacts
                            .iter()
                            .map(|c| ContactButton::new(c, question))
                            .collect(),
                    ));
                }
                out.push(Affordance::QuickStart);
                out
            }
            Self::GuideToPage { .. } | Self::Other(_) => Vec::new(),
        }
    }
}
