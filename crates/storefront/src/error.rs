//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ClientError` type for the storefront client. Front-ends
//! report it with [`capture`], which sends it to Sentry and logs the event ID.

use bonprix_core::{ContactNumberError, PriceError};
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::ApiError;
use crate::storage::StorageError;

/// Client-level error type for the storefront.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Store API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Checkout was refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A price could not be parsed.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// A contact number could not be parsed.
    #[error("Invalid contact number: {0}")]
    ContactNumber(#[from] ContactNumberError),

    /// Terminal or other front-end I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Referenced product is not in the cart.
    #[error("Not in cart: {0}")]
    NotInCart(String),
}

impl ClientError {
    /// Whether the error is worth reporting to Sentry.
    ///
    /// User-facing refusals are expected and already shown to the user.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Storage(_) | Self::Api(_) | Self::Io(_)
        )
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Report an error: capture to Sentry when reportable, and log it.
pub fn capture(error: &ClientError) {
    if error.is_reportable() {
        let event_id = sentry::capture_error(error);
        tracing::error!(
            error = %error,
            sentry_event_id = %event_id,
            "Client error"
        );
    } else {
        tracing::warn!(error = %error, "Action refused");
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
