// ── Runtime catalog configuration ──
//
// Describes where the catalog lives and how the store treats it. Front
// ends build a `CatalogConfig` and hand it in; core never reads files.

use std::time::Duration;

use url::Url;
use vitrine_api::{CatalogClient, TransportConfig};

use crate::error::CoreError;
use crate::store::{ProductStore, StoreOptions};

/// Public demo catalog.
pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

/// Result-size limit sent with every fetch unless overridden.
pub const DEFAULT_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog endpoint returning a JSON array of products.
    pub endpoint: Url,
    /// `limit` query parameter; `None` fetches everything.
    pub limit: Option<u32>,
    /// Per-fetch timeout, applied to the HTTP client and the store.
    pub timeout: Duration,
    /// How long a successful fetch is reused.
    pub cache_ttl: Duration,
    /// Skip the network entirely and serve the bundled catalog.
    pub offline: bool,
}

impl CatalogConfig {
    /// Defaults for everything but the endpoint.
    pub fn new(endpoint: Url) -> Self {
        let options = StoreOptions::default();
        Self {
            endpoint,
            limit: Some(DEFAULT_LIMIT),
            timeout: options.fetch_timeout,
            cache_ttl: options.cache_ttl,
            offline: options.offline,
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            cache_ttl: self.cache_ttl,
            fetch_timeout: self.timeout,
            offline: self.offline,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::with_timeout(self.timeout)
    }
}

/// Build the HTTP-backed store described by `config`.
pub fn open_store(config: &CatalogConfig) -> Result<ProductStore<CatalogClient>, CoreError> {
    let client = CatalogClient::new(config.endpoint.clone(), config.limit, &config.transport())?;
    Ok(ProductStore::new(client, config.store_options()))
}
