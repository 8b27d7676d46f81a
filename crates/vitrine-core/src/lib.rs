//! Data layer between `vitrine-api` and the `vitrine` front end.
//!
//! This crate owns the domain model and every derivation the browser needs:
//!
//! - **[`ProductStore`]**: Loads the catalog from a [`ProductSource`]
//!   (normally the HTTP [`CatalogClient`](vitrine_api::CatalogClient)),
//!   memoizes successful fetches in a [`CatalogCache`] for a fixed window,
//!   and degrades to a bundled fallback list whenever the source fails.
//!   `load()` never fails; [`CatalogOrigin`] records where the data came from.
//!
//! - **Filter/sort engine** ([`filter::apply`]): Pure function from a
//!   product snapshot and [`FilterCriteria`] to an ordered, filtered list.
//!
//! - **Selection manager** ([`selection`]): Pure functions keeping a
//!   selected [`ProductId`] valid against a changing filtered list, plus
//!   circular prev/next navigation.
//!
//! - **[`Browser`]**: A browse session tying the three together: it owns
//!   the snapshot, the criteria and the selection, and re-runs the engine
//!   and reconciliation explicitly on every change.
//!
//! - **Facets** ([`facets`]): Category list and price bounds derived from a
//!   snapshot, used to seed the filter controls.

pub mod browser;
pub mod config;
pub mod convert;
pub mod criteria;
pub mod error;
pub mod facets;
pub mod filter;
pub mod model;
pub mod selection;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use browser::Browser;
pub use config::{CatalogConfig, DEFAULT_ENDPOINT, DEFAULT_LIMIT, open_store};
pub use criteria::{CategorySelection, FilterCriteria, SortMode};
pub use error::{CoreError, FetchError};
pub use facets::{CategoryFacet, PriceBounds};
pub use model::{Product, ProductId, Rating};
pub use selection::Direction;
pub use store::{
    CatalogCache, CatalogOrigin, Clock, LoadedCatalog, ProductSource, ProductStore,
    StoreOptions, SystemClock,
};
