//! Presentation theme token.

use serde::{Deserialize, Serialize};

/// Light/dark presentation, persisted as the CSS class applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    LightMode,
    DarkMode,
}

impl Theme {
    /// The stored token (`light-mode` / `dark-mode`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LightMode => "light-mode",
            Self::DarkMode => "dark-mode",
        }
    }

    /// Parse a stored token. Unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "light-mode" => Some(Self::LightMode),
            "dark-mode" => Some(Self::DarkMode),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::LightMode => Self::DarkMode,
            Self::DarkMode => Self::LightMode,
        }
    }

    /// Icon shown on the toggle button: the theme a click switches to.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::LightMode => "🌙",
            Self::DarkMode => "☀️",
        }
    }
}
