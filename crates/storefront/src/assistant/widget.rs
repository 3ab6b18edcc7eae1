//! The chat widget.
//!
//! Owns the transcript and routes every user action (open, send, quick-start,
//! speaker, microphone) to the collaborators. Rendering is left to the
//! caller: the transcript is a plain list of [`ChatEntry`] values and replies
//! are drawn through a [`RevealSink`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::instrument;

use super::intent::{Affordance, ContactButton, Intent, QUICK_START_PROMPTS};
use super::recognition::{Microphone, SpeechRecognizer};
use super::speech::{Speaker, SpeechSynthesizer};
use super::typing::{RevealSink, reply_markup, reveal};
use super::{AssistantLink, CONNECTION_ERROR_MESSAGE, WELCOME_MESSAGE};
use crate::services::AssistantBackend;
use crate::storage::KeyValueStore;

/// Text of the placeholder shown while waiting for a reply.
pub const PENDING_TEXT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One chat bubble. Assistant text is stored as rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// One transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEntry {
    Message(ChatMessage),
    QuickStart,
    LinkButtons(Vec<AssistantLink>),
    ContactButtons(Vec<ContactButton>),
}

/// Result of sending a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing happened.
    Ignored,
    Answered(Intent),
    /// The backend could not be reached.
    Failed,
}

/// A navigation the widget wants the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub url: String,
    pub after: Duration,
}

/// The assistant chat widget.
pub struct AssistantWidget<B, S, K, R> {
    backend: B,
    speaker: Speaker<S, K>,
    microphone: Microphone<R>,
    typing_delay: Duration,
    open: bool,
    welcomed: bool,
    last_question: String,
    transcript: Vec<ChatEntry>,
    pending_navigation: Option<PendingNavigation>,
}

impl<B, S, K, R> AssistantWidget<B, S, K, R>
where
    B: AssistantBackend,
    S: SpeechSynthesizer,
    K: KeyValueStore,
    R: SpeechRecognizer,
{
    pub fn new(
        backend: B,
        speaker: Speaker<S, K>,
        microphone: Microphone<R>,
        typing_delay: Duration,
    ) -> Self {
        Self {
            backend,
            speaker,
            microphone,
            typing_delay,
            open: false,
            welcomed: false,
            last_question: String::new(),
            transcript: Vec::new(),
            pending_navigation: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    #[must_use]
    pub fn last_question(&self) -> &str {
        &self.last_question
    }

    pub const fn speaker(&self) -> &Speaker<S, K> {
        &self.speaker
    }

    pub const fn microphone(&self) -> &Microphone<R> {
        &self.microphone
    }

    /// Open or close the window. Returns whether it is now open.
    ///
    /// The first open greets the user; closing silences the widget.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;

        if self.open {
            if !self.welcomed {
                self.welcomed = true;
                self.push_message(Sender::Assistant, WELCOME_MESSAGE);
                self.transcript.push(ChatEntry::QuickStart);
                self.speaker.speak(WELCOME_MESSAGE);
            }
        } else {
            self.speaker.cancel();
            self.microphone.stop_if_listening();
        }

        self.open
    }

    /// Send a question and render the reply.
    #[instrument(skip(self, sink))]
    pub async fn send_message(&mut self, input: &str, sink: &mut dyn RevealSink) -> SendOutcome {
        let question = input.trim();
        if question.is_empty() {
            return SendOutcome::Ignored;
        }

        self.last_question = question.to_owned();
        self.speaker.cancel();
        self.push_message(Sender::User, question);
        self.push_message(Sender::Assistant, PENDING_TEXT);
        let pending = self.transcript.len() - 1;

        let reply = match self.backend.ask(question).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Assistant request failed");
                self.set_message_text(pending, CONNECTION_ERROR_MESSAGE);
                sink.show_text(CONNECTION_ERROR_MESSAGE);
                sink.show_markup(CONNECTION_ERROR_MESSAGE);
                self.speaker.speak(CONNECTION_ERROR_MESSAGE);
                return SendOutcome::Failed;
            }
        };

        self.speaker.speak(&reply.response);
        reveal(&reply.response, sink, self.typing_delay).await;
        self.set_message_text(pending, reply_markup(&reply.response));

        let intent = Intent::from_reply(&reply);
        for affordance in intent.affordances(&self.last_question) {
            match affordance {
                Affordance::Navigate { url, after } => {
                    self.pending_navigation = Some(PendingNavigation { url, after });
                }
                Affordance::LinkButtons(links) => {
                    self.transcript.push(ChatEntry::LinkButtons(links));
                }
                Affordance::ContactButtons(buttons) => {
                    self.transcript.push(ChatEntry::ContactButtons(buttons));
                }
                Affordance::QuickStart => self.transcript.push(ChatEntry::QuickStart),
            }
        }

        SendOutcome::Answered(intent)
    }

    /// Send the question behind quick-start button `index`.
    pub async fn choose_quick_start(
        &mut self,
        index: usize,
        sink: &mut dyn RevealSink,
    ) -> SendOutcome {
        match QUICK_START_PROMPTS.get(index) {
            Some(prompt) => self.send_message(prompt.question, sink).await,
            None => SendOutcome::Ignored,
        }
    }

    /// Flip read-aloud from the speaker button on transcript row `entry`.
    ///
    /// Turning it on reads that row's message again.
    pub fn toggle_speaker(&mut self, entry: usize) -> bool {
        let active = self.speaker.toggle();
        if active {
            if let Some(ChatEntry::Message(message)) = self.transcript.get(entry) {
                self.speaker.speak(&message.text);
            }
        }
        active
    }

    /// The microphone control was clicked.
    pub fn mic_click(&mut self) {
        if let Some(notice) = self.microphone.click() {
            self.push_message(Sender::Assistant, notice);
        }
    }

    pub const fn mic_on_start(&mut self) {
        self.microphone.on_start();
    }

    /// A dictated question arrived; it is sent straight away.
    pub async fn mic_on_result(&mut self, transcript: &str, sink: &mut dyn RevealSink) -> SendOutcome {
        match self.microphone.on_result(transcript) {
            Some(question) => self.send_message(&question, sink).await,
            None => SendOutcome::Ignored,
        }
    }

    pub const fn mic_on_end(&mut self) {
        self.microphone.on_end();
    }

    pub fn mic_on_error(&mut self, error: &str) {
        let notice = self.microphone.on_error(error);
        self.push_message(Sender::Assistant, notice);
    }

    /// Take the navigation requested by the last reply, if any.
    pub const fn take_navigation(&mut self) -> Option<PendingNavigation> {
        self.pending_navigation.take()
    }

    fn push_message(&mut self, sender: Sender, text: impl Into<String>) {
        self.transcript
            .push(ChatEntry::Message(ChatMessage::new(sender, text)));
    }

    fn set_message_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(ChatEntry::Message(message)) = self.transcript.get_mut(index) {
            message.text = text.into();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::assistant::intent::DEFAULT;
    use crate::assistant::recognition::START_FAILED_NOTICE;
    use crate::assistant::recognition::tests::FakeRecognizer;
    use crate::assistant::speech::tests::RecordingSynth;
    use crate::assistant::typing::tests::Frames;
    use crate::assistant::{AssistantReply, WhatsappContact};
    use crate::services::ApiError;
    use crate::storage::MemoryStore;

    struct ScriptedBackend {
        reply: Option<AssistantReply>,
    }

    impl AssistantBackend for ScriptedBackend {
        async fn ask(&self, _question: &str) -> Result<AssistantReply, ApiError> {
            self.reply.clone().ok_or_else(|| ApiError::Parse("offline".to_string()))
        }
    }

    type TestWidget =
        AssistantWidget<ScriptedBackend, RecordingSynth, Arc<MemoryStore>, FakeRecognizer>;

    fn widget(reply: Option<AssistantReply>, speaker_on: bool) -> TestWidget {
        let store = Arc::new(MemoryStore::new());
        AssistantWidget::new(
            ScriptedBackend { reply },
            Speaker::load(RecordingSynth::default(), store, speaker_on),
            Microphone::new(FakeRecognizer::default()),
            Duration::ZERO,
        )
    }

    fn message(entry: &ChatEntry) -> &ChatMessage {
        match entry {
            ChatEntry::Message(m) => m,
            other => panic!("expected a message, got {other:?}"),
        }
    }

    #[test]
    fn test_first_open_welcomes_once() {
        let mut w = widget(None, true);

        assert!(w.toggle());
        assert_eq!(w.transcript().len(), 2);
        assert_eq!(
            message(&w.transcript()[0]).text,
            "Bonjour ! Je suis **Chérif**, votre assistant expert en électronique. Voici quelques sujets que je maîtrise :"
        );
        assert_eq!(w.transcript()[1], ChatEntry::QuickStart);
        assert_eq!(w.speaker().synthesizer().spoken.borrow().len(), 1);

        assert!(!w.toggle());
        assert!(w.toggle());
        assert_eq!(w.transcript().len(), 2);
        assert_eq!(w.speaker().synthesizer().spoken.borrow().len(), 1);
    }

    #[test]
    fn test_close_silences_and_stops_microphone() {
        let mut w = widget(None, true);
        w.toggle();
        w.mic_click();
        w.mic_on_start();

        w.toggle();
        assert!(w.speaker().synthesizer().cancels.get() >= 1);
        assert_eq!(w.microphone().recognizer().stops.get(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut w = widget(None, false);
        let mut frames = Frames::default();
        assert_eq!(w.send_message("   ", &mut frames).await, SendOutcome::Ignored);
        assert!(w.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_answer_is_revealed_and_spoken() {
        let reply = AssistantReply {
            response: "Le **Redmi 13** est top.".to_string(),
            ..AssistantReply::default()
        };
        let mut w = widget(Some(reply), true);
        let mut frames = Frames::default();

        let outcome = w.send_message("  quel téléphone ? ", &mut frames).await;

        assert_eq!(outcome, SendOutcome::Answered(Intent::Other(None)));
        assert_eq!(w.last_question(), "quel téléphone ?");
        assert_eq!(message(&w.transcript()[0]).sender, Sender::User);
        assert_eq!(message(&w.transcript()[0]).text, "quel téléphone ?");
        assert_eq!(
            message(&w.transcript()[1]).text,
            "Le <strong>Redmi 13</strong> est top."
        );
        assert_eq!(frames.markup, ["Le <strong>Redmi 13</strong> est top."]);
        assert_eq!(
            w.speaker().synthesizer().spoken.borrow()[0].text,
            "Le Redmi 13 est top."
        );
    }

    #[tokio::test]
    async fn test_unanswered_question_offers_contacts_and_prompts() {
        let reply = AssistantReply {
            response: "Je n'ai pas compris.".to_string(),
            intent: Some(DEFAULT.to_string()),
            contact_wa: vec![WhatsappContact {
                label: "Support".to_string(),
                number: "224621822134".to_string(),
            }],
            ..AssistantReply::default()
        };
        let mut w = widget(Some(reply), false);
        let mut frames = Frames::default();

        w.send_message("garantie ?", &mut frames).await;

        assert_eq!(w.transcript().len(), 4);
        let ChatEntry::ContactButtons(buttons) = &w.transcript()[2] else {
            panic!("expected contact buttons");
        };
        assert_eq!(buttons[0].label, "Contacter Support");
        assert!(buttons[0].href.contains("garantie%20%3F"));
        assert_eq!(w.transcript()[3], ChatEntry::QuickStart);
    }

    #[tokio::test]
    async fn test_redirect_is_queued() {
        let reply = AssistantReply {
            response: "Je vous emmène au panier.".to_string(),
            redirect: Some("/panier".to_string()),
            ..AssistantReply::default()
        };
        let mut w = widget(Some(reply), false);
        let mut frames = Frames::default();

        w.send_message("panier", &mut frames).await;

        assert_eq!(
            w.take_navigation(),
            Some(PendingNavigation {
                url: "/panier".to_string(),
                after: Duration::from_secs(1)
            })
        );
        assert_eq!(w.take_navigation(), None);
    }

    #[tokio::test]
    async fn test_connection_error_replaces_pending_message() {
        let mut w = widget(None, true);
        let mut frames = Frames::default();

        let outcome = w.send_message("bonjour", &mut frames).await;

        assert_eq!(outcome, SendOutcome::Failed);
        assert_eq!(message(&w.transcript()[1]).text, CONNECTION_ERROR_MESSAGE);
        assert_eq!(frames.text, [CONNECTION_ERROR_MESSAGE]);
        assert_eq!(frames.markup, [CONNECTION_ERROR_MESSAGE]);
        assert_eq!(
            w.speaker().synthesizer().spoken.borrow()[0].text,
            CONNECTION_ERROR_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_reply_after_failed_turn_is_revealed_from_start() {
        let mut w = widget(None, false);
        let mut frames = Frames::default();
        assert_eq!(w.send_message("bonjour", &mut frames).await, SendOutcome::Failed);

        w.backend = ScriptedBackend {
            reply: Some(AssistantReply {
                response: "Oui".to_string(),
                ..AssistantReply::default()
            }),
        };
        let mut frames = Frames::default();
        w.send_message("encore ?", &mut frames).await;

        assert_eq!(frames.text, ["O", "Ou", "Oui"]);
        assert_eq!(frames.markup, ["Oui"]);
    }

    #[tokio::test]
    async fn test_quick_start_sends_prompt_question() {
        let reply = AssistantReply {
            response: "La livraison se fait sous 48h.".to_string(),
            ..AssistantReply::default()
        };
        let mut w = widget(Some(reply), false);
        let mut frames = Frames::default();

        w.choose_quick_start(2, &mut frames).await;
        assert_eq!(w.last_question(), "comment fonctionne la livraison ?");
        assert_eq!(w.choose_quick_start(9, &mut frames).await, SendOutcome::Ignored);
    }

    #[test]
    fn test_speaker_button_rereads_message() {
        let mut w = widget(None, false);
        w.toggle();
        assert!(w.speaker().synthesizer().spoken.borrow().is_empty());

        assert!(w.toggle_speaker(0));
        let spoken = w.speaker().synthesizer().spoken.borrow();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].text.starts_with("Bonjour ! Je suis Chérif"));
    }

    #[test]
    fn test_microphone_failures_are_reported_in_chat() {
        let store = Arc::new(MemoryStore::new());
        let mut w = AssistantWidget::new(
            ScriptedBackend { reply: None },
            Speaker::load(RecordingSynth::default(), store, false),
            Microphone::new(FakeRecognizer {
                refuse: true,
                ..FakeRecognizer::default()
            }),
            Duration::ZERO,
        );

        w.mic_click();
        assert_eq!(message(&w.transcript()[0]).text, START_FAILED_NOTICE);

        w.mic_on_error("network");
        assert!(message(&w.transcript()[1]).text.contains("Erreur: network"));
    }

    #[tokio::test]
    async fn test_dictated_question_is_sent() {
        let reply = AssistantReply {
            response: "Oui.".to_string(),
            ..AssistantReply::default()
        };
        let mut w = widget(Some(reply), false);
        let mut frames = Frames::default();

        w.mic_click();
        w.mic_on_start();
        let outcome = w.mic_on_result("livrez-vous à Kindia ?", &mut frames).await;
        w.mic_on_end();

        assert_eq!(outcome, SendOutcome::Answered(Intent::Other(None)));
        assert_eq!(w.last_question(), "livrez-vous à Kindia ?");
        assert!(!w.microphone().is_listening());
    }
}
