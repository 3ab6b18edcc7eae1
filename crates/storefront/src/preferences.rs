//! Theme preference.
//!
//! Persisted under the `theme` key as the page class (`light-mode` or
//! `dark-mode`). The read-aloud flag lives with the [`Speaker`].
//!
//! [`Speaker`]: crate::assistant::Speaker

use bonprix_core::Theme;

use crate::storage::{KeyValueStore, keys};

/// The current theme and where it is stored.
pub struct ThemePreference<S> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemePreference<S> {
    /// Restore the stored theme. Missing or unknown values mean light mode.
    pub fn load(store: S) -> Self {
        let theme = match store.get(keys::THEME) {
            Ok(Some(token)) => Theme::from_token(&token).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read theme preference");
                Theme::default()
            }
        };
        Self { store, theme }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Icon for the toggle button.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        self.theme.toggle_icon()
    }

    /// Switch to the other theme and persist it.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(keys::THEME, self.theme.as_str()) {
            tracing::error!(error = %e, "Failed to persist theme preference");
        }
        self.theme
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::tests::FullDisk;

    #[test]
    fn test_defaults_to_light_mode() {
        let prefs = ThemePreference::load(MemoryStore::new());
        assert_eq!(prefs.theme(), Theme::LightMode);
        assert_eq!(prefs.icon(), "🌙");
    }

    #[test]
    fn test_unknown_token_falls_back() {
        let prefs = ThemePreference::load(MemoryStore::with_entries([(keys::THEME, "sepia")]));
        assert_eq!(prefs.theme(), Theme::LightMode);
    }

    #[test]
    fn test_toggle_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut prefs = ThemePreference::load(Arc::clone(&store));

        assert_eq!(prefs.toggle(), Theme::DarkMode);
        assert_eq!(prefs.icon(), "☀️");
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark-mode"));

        let reloaded = ThemePreference::load(Arc::clone(&store));
        assert_eq!(reloaded.theme(), Theme::DarkMode);

        prefs.toggle();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("light-mode"));
    }

    #[test]
    fn test_failed_write_still_toggles() {
        let mut prefs = ThemePreference::load(FullDisk::default());

        assert_eq!(prefs.toggle(), Theme::DarkMode);
        assert_eq!(prefs.theme(), Theme::DarkMode);
        assert_eq!(prefs.icon(), "☀️");
    }
}
