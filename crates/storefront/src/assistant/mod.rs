//! Chérif, the storefront assistant.
//!
//! A thin request/render loop: questions go to the server, replies come back
//! as text plus an intent tag, and the intent decides which follow-up
//! buttons the chat shows. Replies can be read aloud and questions can be
//! dictated.
//!
//! # Modules
//!
//! - [`intent`] - reply intents and the follow-up affordances they produce
//! - [`speech`] - read-aloud with a persisted on/off flag
//! - [`recognition`] - microphone state machine over a recognizer port
//! - [`typing`] - incremental reveal of a reply
//! - [`widget`] - the chat widget tying it together

use serde::{Deserialize, Serialize};

pub mod intent;
pub mod recognition;
pub mod speech;
pub mod typing;
pub mod widget;

pub use intent::{Affordance, ContactButton, Intent, QUICK_START_PROMPTS, QuickStartPrompt};
pub use recognition::{
    Microphone, RecognitionError, RecognitionSettings, SpeechRecognizer, UnsupportedRecognizer,
};
pub use speech::{Speaker, SpeechSynthesizer, Utterance};
pub use typing::RevealSink;
pub use widget::{AssistantWidget, ChatEntry, ChatMessage, PendingNavigation, SendOutcome, Sender};

/// Language used for synthesis and recognition.
pub const SPEECH_LANG: &str = "fr-FR";

/// Greeting shown (and spoken) the first time the widget opens.
pub const WELCOME_MESSAGE: &str = "Bonjour ! Je suis **Chérif**, votre assistant expert en électronique. Voici quelques sujets que je maîtrise :";

/// Replaces the pending reply when the server cannot be reached.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erreur de connexion avec Chérif.";

/// Reply from `POST /api/assistant`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Reply text, with `**bold**` markup and newlines.
    #[serde(default)]
    pub response: String,
    /// Page to navigate to after the reply is shown.
    #[serde(default)]
    pub redirect: Option<String>,
    /// Intent tag chosen by the server.
    #[serde(default)]
    pub intent: Option<String>,
    /// Navigation shortcuts for `guide_vers_page`.
    #[serde(default)]
    pub assistant_links: Vec<AssistantLink>,
    /// Human support contacts.
    #[serde(default)]
    pub contact_wa: Vec<WhatsappContact>,
}

/// A navigation shortcut suggested by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantLink {
    pub label: String,
    pub url: String,
}

/// A human support contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsappContact {
    pub label: String,
    pub number: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_optional_fields_default() {
        let reply: AssistantReply =
            serde_json::from_str(r#"{"response": "Veuillez poser une question."}"#).unwrap();
        assert_eq!(reply.response, "Veuillez poser une question.");
        assert!(reply.intent.is_none());
        assert!(reply.redirect.is_none());
        assert!(reply.assistant_links.is_empty());
        assert!(reply.contact_wa.is_empty());
    }

    #[test]
    fn test_reply_with_contacts() {
        let reply: AssistantReply = serde_json::from_str(
            r#"{
                "response": "Je n'ai pas compris.",
                "intent": "defaut",
                "contact_wa": [{"label": "Support Principal", "number": "224621822134"}]
            }"#,
        )
        .unwrap();
        assert_eq!(reply.contact_wa[0].label, "Support Principal");
    }
}
