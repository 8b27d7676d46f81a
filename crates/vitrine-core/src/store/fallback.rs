// ── Bundled fallback catalog ──
//
// Served whenever the product source fails. Parsed once on first use.

use std::sync::{Arc, LazyLock};

use tracing::error;
use vitrine_api::ProductRecord;

use crate::convert::products_from_records;
use crate::model::Product;

const FALLBACK_JSON: &str = include_str!("fallback_products.json");

static FALLBACK: LazyLock<Arc<Vec<Arc<Product>>>> = LazyLock::new(|| {
    let parsed = serde_json::from_str::<Vec<ProductRecord>>(FALLBACK_JSON)
        .map_err(|e| e.to_string())
        .and_then(|records| products_from_records(records).map_err(|e| e.to_string()));

    match parsed {
        Ok(products) => Arc::new(products.into_iter().map(Arc::new).collect()),
        Err(reason) => {
            error!(%reason, "bundled fallback catalog is invalid");
            Arc::new(Vec::new())
        }
    }
});

/// The bundled catalog snapshot (cheap `Arc` clone).
pub(crate) fn products() -> Arc<Vec<Arc<Product>>> {
    Arc::clone(&FALLBACK)
}
