// ── Filter criteria ──
//
// The user's current filter/sort intent. Created with defaults, mutated in
// place by the front end, never persisted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::facets::PriceBounds;
use crate::model::Product;

/// Upper price bound used before the catalog's own bounds are known.
pub const DEFAULT_MAX_PRICE: f64 = 9999.0;

// ── SortMode ────────────────────────────────────────────────────────

/// Ordering applied after filtering.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortMode {
    /// Source order, untouched.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl SortMode {
    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::PriceAsc => "Price: Low → High",
            Self::PriceDesc => "Price: High → Low",
            Self::RatingDesc => "Rating: High → Low",
        }
    }
}

// ── CategorySelection ───────────────────────────────────────────────

/// Category name → selected flag.
///
/// With no entry set to `true` every category passes; otherwise only the
/// selected ones do. Entries keep the order in which they were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelection(IndexMap<String, bool>);

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a category; an unknown category becomes selected.
    pub fn toggle(&mut self, category: &str) {
        let entry = self.0.entry(category.to_owned()).or_insert(false);
        *entry = !*entry;
    }

    pub fn set(&mut self, category: impl Into<String>, selected: bool) {
        self.0.insert(category.into(), selected);
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.0.get(category).copied().unwrap_or(false)
    }

    pub fn any_selected(&self) -> bool {
        self.0.values().any(|selected| *selected)
    }

    /// Whether a product in `category` passes the category filter.
    pub fn allows(&self, category: &str) -> bool {
        !self.any_selected() || self.is_selected(category)
    }

    /// Selected category names, in insertion order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(name, _)| name.as_str())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySelection {
    /// Build a selection with every given category set to `true`.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|c| (c.into(), true)).collect())
    }
}

// ── FilterCriteria ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text, matched case-insensitively against title and description.
    pub query: String,
    pub categories: CategorySelection,
    /// Inclusive.
    pub min_price: f64,
    /// Inclusive.
    pub max_price: f64,
    /// Inclusive lower bound on the rating's rate.
    pub min_rating: f64,
    pub sort: SortMode,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: CategorySelection::new(),
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            min_rating: 0.0,
            sort: SortMode::Relevance,
        }
    }
}

impl FilterCriteria {
    /// The query as matched: trimmed and lower-cased.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Set both price bounds to the catalog's range.
    pub fn fit_price_bounds(&mut self, bounds: PriceBounds) {
        self.min_price = bounds.min;
        self.max_price = bounds.max;
    }

    /// Whether `product` passes all four filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with_query(product, &self.normalized_query())
    }

    /// `matches` with the query already normalized, so a whole list can be
    /// filtered without re-normalizing per product.
    pub(crate) fn matches_with_query(&self, product: &Product, query: &str) -> bool {
        text_matches(product, query)
            && self.categories.allows(&product.category)
            && self.price_matches(product)
            && product.rate() >= self.min_rating
    }

    fn price_matches(&self, product: &Product) -> bool {
        product.price >= self.min_price && product.price <= self.max_price
    }
}

fn text_matches(product: &Product, query: &str) -> bool {
    query.is_empty()
        || product.title.to_lowercase().contains(query)
        || product.description.to_lowercase().contains(query)
}
