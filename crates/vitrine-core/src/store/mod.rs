// ── Product store ──
//
// Fetches the catalog from a `ProductSource`, memoizes successful fetches
// in a `CatalogCache`, and falls back to the bundled catalog on any fetch
// failure. `load()` always yields a usable snapshot.

mod cache;
mod clock;
mod fallback;
mod source;

pub use cache::CatalogCache;
pub use clock::{Clock, SystemClock};
pub use source::ProductSource;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{CoreError, FetchError};
use crate::model::{Product, ProductId};

// ── Options ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long a successful fetch is served from memory.
    pub cache_ttl: Duration,
    /// Upper bound on one fetch, enforced by the store.
    pub fetch_timeout: Duration,
    /// Never contact the source; serve the bundled catalog.
    pub offline: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
            offline: false,
        }
    }
}

// ── Load result ─────────────────────────────────────────────────────

/// Where a loaded snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogOrigin {
    /// Fetched from the source just now.
    Remote,
    /// Served from the cache; fetched at `fetched_at`.
    Cache { fetched_at: DateTime<Utc> },
    /// The source failed; this is the bundled catalog.
    Fallback {
        #[serde(serialize_with = "serialize_reason")]
        reason: FetchError,
    },
}

fn serialize_reason<S: serde::Serializer>(reason: &FetchError, ser: S) -> Result<S::Ok, S::Error> {
    ser.collect_str(reason)
}

impl CatalogOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub products: Arc<Vec<Arc<Product>>>,
    pub origin: CatalogOrigin,
}

impl LoadedCatalog {
    pub fn find(&self, id: ProductId) -> Result<&Arc<Product>, CoreError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound { id })
    }
}

// ── Store ───────────────────────────────────────────────────────────

pub struct ProductStore<S, C = SystemClock> {
    source: S,
    clock: C,
    options: StoreOptions,
    /// Held across check-fetch-set so overlapping loads share one fetch.
    cache: Mutex<CatalogCache>,
}

impl<S: ProductSource> ProductStore<S> {
    pub fn new(source: S, options: StoreOptions) -> Self {
        Self::with_clock(source, options, SystemClock)
    }
}

impl<S: ProductSource, C: Clock> ProductStore<S, C> {
    pub fn with_clock(source: S, options: StoreOptions, clock: C) -> Self {
        Self {
            source,
            clock,
            options,
            cache: Mutex::new(CatalogCache::new(options.cache_ttl)),
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Serve the cached catalog if fresh, otherwise fetch it.
    ///
    /// Never fails: any fetch failure yields the bundled catalog with
    /// `CatalogOrigin::Fallback`, and the next call retries the source.
    pub async fn load(&self) -> LoadedCatalog {
        let mut cache = self.cache.lock().await;
        if let Some((products, fetched_at)) = cache.get(self.clock.now()) {
            debug!(count = products.len(), %fetched_at, "catalog cache hit");
            return LoadedCatalog {
                products,
                origin: CatalogOrigin::Cache { fetched_at },
            };
        }
        self.fetch_into(&mut cache).await
    }

    /// Drop the cached entry, then load from the source.
    pub async fn refresh(&self) -> LoadedCatalog {
        let mut cache = self.cache.lock().await;
        cache.invalidate();
        self.fetch_into(&mut cache).await
    }

    pub async fn invalidate(&self) {
        self.cache.lock().await.invalidate();
    }

    // ── Private helpers ──────────────────────────────────────────────

    async fn fetch_into(&self, cache: &mut CatalogCache) -> LoadedCatalog {
        match self.fetch().await {
            Ok(products) => {
                let products: Arc<Vec<Arc<Product>>> =
                    Arc::new(products.into_iter().map(Arc::new).collect());
                cache.put(Arc::clone(&products), self.clock.now());
                info!(count = products.len(), "catalog loaded from source");
                LoadedCatalog {
                    products,
                    origin: CatalogOrigin::Remote,
                }
            }
            Err(reason) => {
                if reason == FetchError::Offline {
                    info!("offline mode, serving bundled catalog");
                } else {
                    warn!(error = %reason, "catalog fetch failed, serving bundled catalog");
                }
                LoadedCatalog {
                    products: fallback::products(),
                    origin: CatalogOrigin::Fallback { reason },
                }
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Product>, FetchError> {
        if self.options.offline {
            return Err(FetchError::Offline);
        }

        let timeout = self.options.fetch_timeout;
        let products = tokio::time::timeout(timeout, self.source.fetch())
            .await
            .map_err(|_| FetchError::Timeout { timeout })??;

        if products.is_empty() {
            return Err(FetchError::payload("catalog is empty"));
        }
        Ok(products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    /// Scripted source counting its calls.
    struct StubSource {
        calls: AtomicUsize,
        result: Result<Vec<Product>, FetchError>,
    }

    impl StubSource {
        fn ok(ids: &[u64]) -> Self {
            let products = ids
                .iter()
                .map(|&id| Product {
                    id: ProductId::new(id),
                    title: format!("Remote {id}"),
                    description: String::new(),
                    category: "remote".into(),
                    price: 2.5,
                    image: String::new(),
                    rating: None,
                })
                .collect();
            Self {
                calls: AtomicUsize::new(0),
                result: Ok(products),
            }
        }

        fn failing(err: FetchError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Err(err),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ProductSource for StubSource {
        async fn fetch(&self) -> Result<Vec<Product>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Clock moved by hand, in whole seconds.
    #[derive(Default)]
    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn advance(&self, secs: i64) {
            self.0.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(1_700_000_000 + self.0.load(Ordering::SeqCst), 0).unwrap()
        }
    }

    fn options() -> StoreOptions {
        StoreOptions {
            cache_ttl: Duration::from_secs(60),
            ..StoreOptions::default()
        }
    }

    #[tokio::test]
    async fn first_load_is_remote_then_cached() {
        let store = ProductStore::with_clock(StubSource::ok(&[1, 2]), options(), ManualClock::default());

        let first = store.load().await;
        assert_eq!(first.origin, CatalogOrigin::Remote);
        assert_eq!(first.products.len(), 2);

        let second = store.load().await;
        assert!(matches!(second.origin, CatalogOrigin::Cache { .. }));
        assert!(Arc::ptr_eq(&first.products, &second.products));
        assert_eq!(store.source().calls(), 1);
    }

    #[tokio::test]
    async fn expired_cache_refetches() {
        let clock = Arc::new(ManualClock::default());
        let store = ProductStore::with_clock(StubSource::ok(&[1]), options(), Arc::clone(&clock));

        store.load().await;
        clock.advance(59);
        assert!(matches!(store.load().await.origin, CatalogOrigin::Cache { .. }));
        clock.advance(1);
        assert_eq!(store.load().await.origin, CatalogOrigin::Remote);
        assert_eq!(store.source().calls(), 2);
    }

    #[tokio::test]
    async fn failure_serves_fallback_and_is_not_cached() {
        let err = FetchError::Status { status: 500 };
        let store = ProductStore::new(StubSource::failing(err.clone()), options());

        let loaded = store.load().await;
        assert_eq!(loaded.origin, CatalogOrigin::Fallback { reason: err });
        assert!(!loaded.products.is_empty());

        store.load().await;
        assert_eq!(store.source().calls(), 2);
    }

    #[tokio::test]
    async fn empty_source_result_falls_back() {
        let store = ProductStore::new(StubSource::ok(&[]), options());
        let loaded = store.load().await;
        assert!(matches!(
            loaded.origin,
            CatalogOrigin::Fallback {
                reason: FetchError::Payload { .. }
            }
        ));
    }

    #[tokio::test]
    async fn offline_never_calls_source() {
        let opts = StoreOptions {
            offline: true,
            ..options()
        };
        let store = ProductStore::new(StubSource::ok(&[1]), opts);
        let loaded = store.load().await;
        assert_eq!(
            loaded.origin,
            CatalogOrigin::Fallback {
                reason: FetchError::Offline
            }
        );
        assert_eq!(store.source().calls(), 0);
    }

    #[tokio::test]
    async fn refresh_bypasses_fresh_cache() {
        let store = ProductStore::new(StubSource::ok(&[1]), options());
        store.load().await;
        assert_eq!(store.refresh().await.origin, CatalogOrigin::Remote);
        assert_eq!(store.source().calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_next_load_to_fetch() {
        let store = ProductStore::new(StubSource::ok(&[1]), options());
        store.load().await;
        store.invalidate().await;
        assert_eq!(store.load().await.origin, CatalogOrigin::Remote);
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let store = ProductStore::new(StubSource::ok(&[1, 2, 3]), options());
        let (a, b, c) = tokio::join!(store.load(), store.load(), store.load());
        assert_eq!(store.source().calls(), 1);
        assert!(Arc::ptr_eq(&a.products, &b.products));
        assert!(Arc::ptr_eq(&b.products, &c.products));
    }

    #[tokio::test]
    async fn find_reports_missing_product() {
        let store = ProductStore::new(StubSource::ok(&[1, 2]), options());
        let loaded = store.load().await;
        assert_eq!(loaded.find(ProductId::new(2)).unwrap().id, ProductId::new(2));
        assert!(matches!(
            loaded.find(ProductId::new(9)),
            Err(CoreError::ProductNotFound { .. })
        ));
    }

    #[test]
    fn fallback_origin_serializes_reason_as_text() {
        let origin = CatalogOrigin::Fallback {
            reason: FetchError::Status { status: 503 },
        };
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["kind"], "fallback");
        assert_eq!(json["reason"], "catalog source returned HTTP 503");
    }
}
