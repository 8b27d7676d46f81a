// ── Product source ──

use std::future::Future;

use tracing::debug;
use vitrine_api::CatalogClient;

use crate::convert::products_from_records;
use crate::error::FetchError;
use crate::model::Product;

/// Anything that can deliver the full catalog in one shot.
pub trait ProductSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;
}

impl ProductSource for CatalogClient {
    async fn fetch(&self) -> Result<Vec<Product>, FetchError> {
        let records = self.list_products().await.inspect_err(|e| {
            debug!(
                transient = e.is_transient(),
                status = ?e.status(),
                error = %e,
                "catalog request failed"
            );
        })?;
        products_from_records(records)
    }
}
