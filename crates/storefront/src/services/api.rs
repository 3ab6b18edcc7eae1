//! Store API client.
//!
//! Talks to the two JSON endpoints the storefront server exposes:
//! order registration and the assistant. No timeouts and no retries are
//! applied; callers decide how a failure degrades.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::{ApiError, AssistantBackend, OrderRecorder};
use crate::assistant::AssistantReply;
use crate::checkout::OrderRecord;

/// Order registration endpoint.
const RECORD_ORDER_PATH: &str = "/api/enregistrer-commande";

/// Assistant endpoint.
const ASSISTANT_PATH: &str = "/api/assistant";

/// Body of an assistant request.
#[derive(Debug, Serialize)]
struct AssistantQuestion<'a> {
    question: &'a str,
}

/// HTTP client for the storefront server.
#[derive(Clone)]
pub struct StoreApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl StoreApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Server origin the client talks to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// POST a JSON body and fail on non-success statuses.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

impl OrderRecorder for StoreApiClient {
    #[instrument(skip_all, fields(items = order.items.len()))]
    async fn record_order(&self, order: &OrderRecord) -> Result<(), ApiError> {
        self.post_json(RECORD_ORDER_PATH, order).await?;
        tracing::debug!("Order registration accepted");
        Ok(())
    }
}

impl AssistantBackend for StoreApiClient {
    #[instrument(skip(self))]
    async fn ask(&self, question: &str) -> Result<AssistantReply, ApiError> {
        let response = self
            .post_json(ASSISTANT_PATH, &AssistantQuestion { question })
            .await?;

        let reply: AssistantReply = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        tracing::debug!(intent = ?reply.intent, "Assistant replied");
        Ok(reply)
    }
}
