// ── Filter/sort engine ──
//
// Pure derivation from a product snapshot and criteria to the visible,
// ordered list. Never mutates its input; products are shared via `Arc`.

use std::sync::Arc;

use crate::criteria::{FilterCriteria, SortMode};
use crate::model::Product;

/// Filter `products` by `criteria`, then order the survivors.
///
/// Filtering keeps source order ("relevance"). Any other sort mode is
/// applied with a stable sort, so equal keys keep their filtered order.
/// Bounds are taken as given: `min_price > max_price` simply matches
/// nothing.
pub fn apply(products: &[Arc<Product>], criteria: &FilterCriteria) -> Vec<Arc<Product>> {
    let query = criteria.normalized_query();

    let mut kept: Vec<Arc<Product>> = products
        .iter()
        .filter(|p| criteria.matches_with_query(p, &query))
        .cloned()
        .collect();

    // `sort_by` is stable: equal keys keep their filtered order.
    match criteria.sort {
        SortMode::Relevance => {}
        SortMode::PriceAsc => kept.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => kept.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::RatingDesc => kept.sort_by(|a, b| b.rate().total_cmp(&a.rate())),
    }

    kept
}
