//! Store back-end services.
//!
//! # Services
//!
//! - [`OrderRecorder`] - registers a checked-out order with the back office
//! - [`AssistantBackend`] - answers free-text questions for the assistant
//!
//! [`StoreApiClient`] implements both over the store's JSON endpoints. The
//! traits exist so the checkout flow and the assistant widget can run
//! against in-process fakes.

use std::future::Future;

use thiserror::Error;

use crate::assistant::AssistantReply;
use crate::checkout::OrderRecord;

pub mod api;

pub use api::StoreApiClient;

/// Errors that can occur when calling the store's endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Registers orders with the back office.
pub trait OrderRecorder {
    /// Register an order. Success means the server answered 2xx.
    fn record_order(&self, order: &OrderRecord) -> impl Future<Output = Result<(), ApiError>>;
}

/// Answers assistant questions.
pub trait AssistantBackend {
    /// Ask a question and get the server's reply.
    fn ask(&self, question: &str) -> impl Future<Output = Result<AssistantReply, ApiError>>;
}
