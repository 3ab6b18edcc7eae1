//! Read-aloud.
//!
//! [`Speaker`] wraps a platform synthesizer with the user's on/off choice,
//! persisted under `speakerActive`. Starting a new utterance always cancels
//! the previous one so replies never overlap.

use std::sync::LazyLock;

use regex::Regex;

use super::SPEECH_LANG;
use crate::storage::{KeyValueStore, keys};

#[allow(clippy::expect_used)]
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("Invalid regex"));

/// One piece of text to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub lang: &'static str,
}

/// Platform speech synthesis.
pub trait SpeechSynthesizer {
    /// Whether an utterance is currently playing.
    fn is_speaking(&self) -> bool;

    /// Stop playback and drop queued utterances.
    fn cancel(&self);

    /// Queue an utterance.
    fn speak(&self, utterance: Utterance);
}

/// Strip HTML tags and bold markers so only words are spoken.
#[must_use]
pub fn clean_for_speech(text: &str) -> String {
    HTML_TAG.replace_all(text, "").replace("**", "")
}

/// Read-aloud with a persisted on/off flag.
pub struct Speaker<S, K> {
    synth: S,
    store: K,
    active: bool,
}

impl<S: SpeechSynthesizer, K: KeyValueStore> Speaker<S, K> {
    /// Restore the flag from storage, falling back to `default_active`, and
    /// persist the result.
    pub fn load(synth: S, store: K, default_active: bool) -> Self {
        let active = match store.get(keys::SPEAKER_ACTIVE) {
            Ok(Some(value)) => value == "true",
            Ok(None) => default_active,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read speaker flag");
                default_active
            }
        };

        let mut speaker = Self {
            synth,
            store,
            active,
        };
        speaker.set_active(active);
        speaker
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Icon shown on every speaker button.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        if self.active { "🔊" } else { "🔇" }
    }

    /// Turn read-aloud on or off. Turning it off stops playback.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        let value = if active { "true" } else { "false" };
        if let Err(e) = self.store.set(keys::SPEAKER_ACTIVE, value) {
            tracing::error!(error = %e, "Failed to persist speaker flag");
        }
        if !active && self.synth.is_speaking() {
            self.synth.cancel();
        }
    }

    /// Flip the flag. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_active(!self.active);
        self.active
    }

    /// Stop current playback, if any.
    pub fn cancel(&self) {
        if self.synth.is_speaking() {
            self.synth.cancel();
        }
    }

    /// Speak `text` if read-aloud is on.
    ///
    /// Current playback is cancelled first in either case.
    pub fn speak(&self, text: &str) {
        self.cancel();
        if !self.active {
            return;
        }
        self.synth.speak(Utterance {
            text: clean_for_speech(text),
            lang: SPEECH_LANG,
        });
    }

    /// The underlying synthesizer.
    pub const fn synthesizer(&self) -> &S {
        &self.synth
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::tests::FullDisk;

    /// Synthesizer that records what it was asked to do.
    #[derive(Default)]
    pub(crate) struct RecordingSynth {
        pub speaking: Cell<bool>,
        pub cancels: Cell<usize>,
        pub spoken: RefCell<Vec<Utterance>>,
    }

    impl SpeechSynthesizer for RecordingSynth {
        fn is_speaking(&self) -> bool {
            self.speaking.get()
        }

        fn cancel(&self) {
            self.cancels.set(self.cancels.get() + 1);
            self.speaking.set(false);
        }

        fn speak(&self, utterance: Utterance) {
            self.spoken.borrow_mut().push(utterance);
            self.speaking.set(true);
        }
    }

    #[test]
    fn test_clean_for_speech() {
        assert_eq!(
            clean_for_speech("Bonjour <strong>toi</strong>, **Chérif**<br>\nici"),
            "Bonjour toi, Chérif\nici"
        );
        assert_eq!(clean_for_speech("<span\nclass=\"x\">a</span>"), "a");
    }

    #[test]
    fn test_inactive_speaker_stays_silent() {
        let speaker = Speaker::load(RecordingSynth::default(), MemoryStore::new(), false);
        speaker.speak("Bonjour");
        assert!(speaker.synthesizer().spoken.borrow().is_empty());
    }

    #[test]
    fn test_active_speaker_speaks_french_clean_text() {
        let speaker = Speaker::load(RecordingSynth::default(), MemoryStore::new(), true);
        speaker.speak("**Prix** : 15 000 GNF");

        let spoken = speaker.synthesizer().spoken.borrow();
        assert_eq!(
            spoken.as_slice(),
            [Utterance {
                text: "Prix : 15 000 GNF".to_string(),
                lang: "fr-FR"
            }]
        );
    }

    #[test]
    fn test_new_speech_cancels_previous() {
        let speaker = Speaker::load(RecordingSynth::default(), MemoryStore::new(), true);
        speaker.speak("un");
        speaker.speak("deux");
        assert_eq!(speaker.synthesizer().cancels.get(), 1);
        assert_eq!(speaker.synthesizer().spoken.borrow().len(), 2);
    }

    #[test]
    fn test_stored_flag_overrides_default_and_persists() {
        let store = Arc::new(MemoryStore::with_entries([(keys::SPEAKER_ACTIVE, "true")]));
        let mut speaker = Speaker::load(RecordingSynth::default(), Arc::clone(&store), false);
        assert!(speaker.is_active());
        assert_eq!(speaker.icon(), "🔊");

        speaker.speak("bonjour");
        assert!(!speaker.toggle());
        assert_eq!(speaker.icon(), "🔇");
        assert_eq!(speaker.synthesizer().cancels.get(), 1);
        assert_eq!(
            store.get(keys::SPEAKER_ACTIVE).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_default_is_persisted_on_load() {
        let store = Arc::new(MemoryStore::new());
        let _speaker = Speaker::load(RecordingSynth::default(), Arc::clone(&store), true);
        assert_eq!(store.get(keys::SPEAKER_ACTIVE).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_failed_write_still_switches_speaker() {
        let store = FullDisk {
            seed: MemoryStore::with_entries([(keys::SPEAKER_ACTIVE, "true")]),
        };
        let mut speaker = Speaker::load(RecordingSynth::default(), store, false);
        assert!(speaker.is_active());

        speaker.speak("bonjour");
        assert!(!speaker.toggle());
        assert!(!speaker.is_active());
        assert!(!speaker.synthesizer().is_speaking());

        speaker.speak("silence");
        assert_eq!(speaker.synthesizer().spoken.borrow().len(), 1);
    }
}
