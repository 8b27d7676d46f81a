// ── Catalog facets ──
//
// Values derived from a whole snapshot (not the filtered view) that seed
// the filter controls: the category list and the price range.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::Product;

/// A category present in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFacet {
    pub name: String,
    /// Number of products in this category.
    pub count: usize,
}

/// Whole-number price range covering every product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// Distinct categories in order of first appearance.
pub fn categories(products: &[Arc<Product>]) -> Vec<CategoryFacet> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| CategoryFacet {
            name: name.to_owned(),
            count,
        })
        .collect()
}

/// `floor(min price)` to `ceil(max price)`; `None` for an empty snapshot.
pub fn price_bounds(products: &[Arc<Product>]) -> Option<PriceBounds> {
    let mut prices = products.iter().map(|p| p.price);
    let first = prices.next()?;
    let (min, max) = prices.fold((first, first), |(lo, hi), price| (lo.min(price), hi.max(price)));
    Some(PriceBounds {
        min: min.floor(),
        max: max.ceil(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use pretty_assertions::assert_eq;

    fn product(id: u64, price: f64, category: &str) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            description: String::new(),
            category: category.into(),
            price,
            image: String::new(),
            rating: None,
        })
    }

    #[test]
    fn categories_in_first_seen_order_with_counts() {
        let products = vec![
            product(1, 1.0, "men's clothing"),
            product(2, 1.0, "jewelery"),
            product(3, 1.0, "men's clothing"),
        ];
        let facets = categories(&products);
        assert_eq!(
            facets,
            vec![
                CategoryFacet {
                    name: "men's clothing".into(),
                    count: 2
                },
                CategoryFacet {
                    name: "jewelery".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn price_bounds_floor_and_ceil() {
        let products = vec![
            product(1, 109.95, "a"),
            product(2, 22.3, "a"),
            product(3, 55.99, "a"),
        ];
        let bounds = price_bounds(&products).unwrap();
        assert_eq!(bounds, PriceBounds { min: 22.0, max: 110.0 });
    }

    #[test]
    fn price_bounds_of_empty_snapshot() {
        assert!(price_bounds(&[]).is_none());
        assert!(categories(&[]).is_empty());
    }
}
