//! Client state shared by the front-end.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::preferences::ThemePreference;
use crate::services::StoreApiClient;
use crate::storage::FileStore;

/// Shared handles for one storefront session.
///
/// Cheaply cloneable via `Arc`; every component reads and writes the same
/// storage file.
#[derive(Clone)]
pub struct ClientState {
    inner: Arc<ClientStateInner>,
}

struct ClientStateInner {
    config: ClientConfig,
    storage: Arc<FileStore>,
    api: StoreApiClient,
}

impl ClientState {
    /// Open local storage and build the API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be read or the HTTP
    /// client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let storage = Arc::new(FileStore::open(&config.storage_path)?);
        let api = StoreApiClient::new(config.base_url.clone())?;

        Ok(Self {
            inner: Arc::new(ClientStateInner {
                config,
                storage,
                api,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Shared local storage.
    #[must_use]
    pub fn storage(&self) -> Arc<FileStore> {
        Arc::clone(&self.inner.storage)
    }

    #[must_use]
    pub fn api(&self) -> &StoreApiClient {
        &self.inner.api
    }

    /// Rehydrate the cart from storage.
    #[must_use]
    pub fn cart(&self) -> CartStore<Arc<FileStore>> {
        CartStore::load(self.storage())
    }

    /// Rehydrate the theme preference from storage.
    #[must_use]
    pub fn theme(&self) -> ThemePreference<Arc<FileStore>> {
        ThemePreference::load(self.storage())
    }
}
