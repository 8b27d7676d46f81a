// ── Catalog cache ──
//
// A single timestamped snapshot. Fresh while `0 <= now - fetched_at < ttl`;
// a zero TTL disables caching.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::Product;

#[derive(Debug, Clone)]
struct CacheEntry {
    products: Arc<Vec<Arc<Product>>>,
    fetched_at: DateTime<Utc>,
}

/// Owned by one `ProductStore`; lives as long as the store does.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached snapshot and its fetch time, if still fresh at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<(Arc<Vec<Arc<Product>>>, DateTime<Utc>)> {
        let entry = self.entry.as_ref()?;
        let age = now.signed_duration_since(entry.fetched_at);
        // A clock that moved backwards past the fetch time makes the entry stale.
        if age < TimeDelta::zero() {
            return None;
        }
        // A TTL too large for chrono never expires.
        let fresh = match TimeDelta::from_std(self.ttl) {
            Ok(ttl) => age < ttl,
            Err(_) => true,
        };
        fresh.then(|| (Arc::clone(&entry.products), entry.fetched_at))
    }

    pub fn put(&mut self, products: Arc<Vec<Arc<Product>>>, now: DateTime<Utc>) {
        self.entry = Some(CacheEntry {
            products,
            fetched_at: now,
        });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
