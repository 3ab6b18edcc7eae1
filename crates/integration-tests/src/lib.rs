//! Integration tests for the Bon Coin Bon Prix storefront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bonprix-integration-tests
//! ```
//!
//! No external services are needed: the store API is played by a
//! `wiremock` server and local storage lives in a temporary directory.
//!
//! # Test Categories
//!
//! - `checkout_flow` - cart to WhatsApp handoff against the store API
//! - `assistant_flow` - chat widget against the assistant endpoint
//! - `persistence` - state surviving a restart through the storage file

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::HashMap;

use bonprix_storefront::config::ClientConfig;
use bonprix_storefront::state::ClientState;
use bonprix_storefront::ui::{Dialogs, LinkOpener};
use tempfile::TempDir;
use wiremock::MockServer;

/// Order registration endpoint path.
pub const RECORD_ORDER_PATH: &str = "/api/enregistrer-commande";

/// Assistant endpoint path.
pub const ASSISTANT_PATH: &str = "/api/assistant";

/// Primary contact number used in tests.
pub const WHATSAPP_NUMBER: &str = "+224621822134";

/// A mock store server plus client state backed by a temporary directory.
pub struct TestContext {
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Configuration pointing at the mock server and the temp storage file.
    pub fn config(&self, extra: &[(&str, &str)]) -> ClientConfig {
        let storage = self.dir.path().join("storage.json");
        let mut vars: HashMap<String, String> = HashMap::from([
            ("BONPRIX_BASE_URL".to_string(), self.server.uri()),
            ("BONPRIX_WHATSAPP_NUMBER".to_string(), WHATSAPP_NUMBER.to_string()),
            ("BONPRIX_TYPING_DELAY_MS".to_string(), "0".to_string()),
            (
                "BONPRIX_STORAGE_PATH".to_string(),
                storage.to_string_lossy().into_owned(),
            ),
        ]);
        for (k, v) in extra {
            vars.insert((*k).to_string(), (*v).to_string());
        }
        ClientConfig::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config")
    }

    /// Fresh client state, as after a restart.
    pub fn state(&self) -> ClientState {
        ClientState::new(self.config(&[])).expect("Failed to build client state")
    }
}

/// Dialogs and link opener that record what the user would have seen.
#[derive(Default)]
pub struct RecordingUi {
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<String>>,
    /// Answer given to every confirmation.
    pub accept: bool,
}

impl RecordingUi {
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            accept: true,
            ..Self::default()
        }
    }
}

impl Dialogs for RecordingUi {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_owned());
        self.accept
    }
}

impl LinkOpener for RecordingUi {
    fn open(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_owned());
    }
}

/// Reveal sink keeping the last frame of each kind.
#[derive(Debug, Default)]
pub struct CapturedReveal {
    pub frames: usize,
    pub text: String,
    pub markup: String,
}

impl bonprix_storefront::assistant::RevealSink for CapturedReveal {
    fn show_text(&mut self, text: &str) {
        self.frames += 1;
        text.clone_into(&mut self.text);
    }

    fn show_markup(&mut self, markup: &str) {
        markup.clone_into(&mut self.markup);
    }
}
