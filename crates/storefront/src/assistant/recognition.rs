//! Dictation.
//!
//! [`Microphone`] tracks whether the recognizer is listening and what the
//! input control should show. The platform recognizer reports back through
//! the `on_*` callbacks.

use thiserror::Error;

use super::SPEECH_LANG;

/// Notice appended when the recognizer refuses to start.
pub const START_FAILED_NOTICE: &str =
    "🎙️ Impossible d'activer le micro. Veuillez vérifier vos autorisations.";

/// Input placeholder while listening.
pub const LISTENING_PLACEHOLDER: &str = "Écoute en cours... Parlez maintenant...";

/// Input placeholder while idle.
pub const IDLE_PLACEHOLDER: &str = "Posez votre question...";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("speech recognition is not supported")]
    Unsupported,

    #[error("{0}")]
    Failed(String),
}

/// How the recognizer is configured for each session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub lang: &'static str,
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            lang: SPEECH_LANG,
            continuous: false,
            interim_results: false,
        }
    }
}

/// Platform speech recognition.
pub trait SpeechRecognizer {
    fn is_supported(&self) -> bool;

    /// Begin a session.
    ///
    /// # Errors
    ///
    /// Returns error if the platform refuses to start (permissions, busy).
    fn start(&self, settings: &RecognitionSettings) -> Result<(), RecognitionError>;

    fn stop(&self);
}

/// Recognizer for platforms without dictation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&self, _settings: &RecognitionSettings) -> Result<(), RecognitionError> {
        Err(RecognitionError::Unsupported)
    }

    fn stop(&self) {}
}

/// Microphone control state.
pub struct Microphone<R> {
    recognizer: R,
    settings: RecognitionSettings,
    listening: bool,
}

impl<R: SpeechRecognizer> Microphone<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            settings: RecognitionSettings::default(),
            listening: false,
        }
    }

    /// Whether the control is shown at all.
    pub fn is_visible(&self) -> bool {
        self.recognizer.is_supported()
    }

    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        if self.listening { "🔴" } else { "🎙️" }
    }

    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        if self.listening {
            LISTENING_PLACEHOLDER
        } else {
            IDLE_PLACEHOLDER
        }
    }

    /// Handle a click on the control.
    ///
    /// Returns a notice for the transcript when the recognizer fails to
    /// start.
    pub fn click(&mut self) -> Option<&'static str> {
        if !self.is_visible() {
            return None;
        }
        if self.listening {
            self.recognizer.stop();
            return None;
        }
        match self.recognizer.start(&self.settings) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start speech recognition");
                Some(START_FAILED_NOTICE)
            }
        }
    }

    pub const fn on_start(&mut self) {
        self.listening = true;
    }

    /// A final transcript arrived. Returns the question to send, if any.
    pub fn on_result(&mut self, transcript: &str) -> Option<String> {
        let transcript = transcript.trim();
        (!transcript.is_empty()).then(|| transcript.to_owned())
    }

    pub const fn on_end(&mut self) {
        self.listening = false;
    }

    /// The session failed. Returns the notice to append.
    pub fn on_error(&mut self, error: &str) -> String {
        self.listening = false;
        tracing::warn!(error, "Speech recognition error");
        format!("🎙️ Erreur: {error}. Assurez-vous d'avoir autorisé le microphone.")
    }

    /// Stop the current session, if any.
    pub fn stop_if_listening(&mut self) {
        if self.listening {
            self.recognizer.stop();
        }
    }

    pub const fn recognizer(&self) -> &R {
        &self.recognizer
    }
}
