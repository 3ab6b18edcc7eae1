//! User-interaction ports.
//!
//! The storefront never talks to a screen directly. Blocking dialogs and
//! external link handoff go through these traits, implemented by the
//! front-end (terminal, browser bridge) and by recording fakes in tests.

/// Modal dialogs shown to the user.
pub trait Dialogs {
    /// Show an informational message.
    fn alert(&self, message: &str);

    /// Ask a yes/no question. Returns `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;
}

/// Opens an external link (a messaging deep link) outside the storefront.
pub trait LinkOpener {
    /// Hand the URL to the platform.
    fn open(&self, url: &str);
}
