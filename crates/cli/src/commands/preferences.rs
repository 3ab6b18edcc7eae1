//! Theme and speaker preferences.

#![allow(clippy::print_stdout)]

use bonprix_storefront::assistant::Speaker;
use bonprix_storefront::state::ClientState;

use crate::terminal::LoggingSynthesizer;

pub fn show_theme(state: &ClientState) {
    let prefs = state.theme();
    println!("{} {}", prefs.icon(), prefs.theme().as_str());
}

pub fn toggle_theme(state: &ClientState) {
    let mut prefs = state.theme();
    let theme = prefs.toggle();
    tracing::info!(theme = theme.as_str(), "Theme changed");
    println!("{} {}", prefs.icon(), theme.as_str());
}

pub fn set_speaker(state: &ClientState, active: bool) {
    let mut speaker = Speaker::load(
        LoggingSynthesizer::default(),
        state.storage(),
        state.config().speaker_active,
    );
    speaker.set_active(active);
    println!("{}", speaker.icon());
}
