//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use vitrine_core::{
    CategorySelection, FilterCriteria, LoadedCatalog, Product, ProductSource, ProductStore,
    Rating, facets,
};

use crate::cli::{FilterArgs, GlobalOpts};
use crate::error::CliError;

/// Load the catalog, with a spinner on stderr when it is a terminal.
pub async fn load_catalog<S: ProductSource>(
    store: &ProductStore<S>,
    global: &GlobalOpts,
) -> LoadedCatalog {
    let spinner = (!global.quiet && std::io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("loading catalog");
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    });

    let loaded = store.load().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    debug!(count = loaded.products.len(), origin = ?loaded.origin, "catalog ready");
    loaded
}

/// Build criteria from filter flags. Price bounds the user left out are
/// fitted to the catalog's range.
pub fn criteria_from_args(args: &FilterArgs, products: &[Arc<Product>]) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    if let Some(bounds) = facets::price_bounds(products) {
        criteria.fit_price_bounds(bounds);
    }

    if let Some(ref query) = args.query {
        criteria.query.clone_from(query);
    }
    criteria.categories = args.category.iter().cloned().collect::<CategorySelection>();
    if let Some(min) = args.min_price {
        criteria.min_price = min;
    }
    if let Some(max) = args.max_price {
        criteria.max_price = max;
    }
    if let Some(rating) = args.min_rating {
        criteria.min_rating = rating;
    }
    criteria.sort = args.sort;
    criteria
}

/// Price with two decimals.
pub fn money(price: f64) -> String {
    format!("${price:.2}")
}

/// Five-star bar, rounded to the nearest whole star.
pub fn stars(rating: Rating) -> String {
    let filled = usize::from(rating.filled_stars());
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Io(std::io::Error::other(format!("prompt failed: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitrine_core::{ProductId, SortMode};

    fn product(id: u64, price: f64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            description: String::new(),
            category: "a".into(),
            price,
            image: String::new(),
            rating: None,
        })
    }

    #[test]
    fn absent_bounds_are_fitted_to_catalog() {
        let products = vec![product(1, 12.4), product(2, 99.5)];
        let criteria = criteria_from_args(&FilterArgs::default(), &products);
        assert!((criteria.min_price - 12.0).abs() < f64::EPSILON);
        assert!((criteria.max_price - 100.0).abs() < f64::EPSILON);
        assert!(!criteria.categories.any_selected());
    }

    #[test]
    fn flags_override_fitted_bounds() {
        let products = vec![product(1, 12.4), product(2, 99.5)];
        let args = FilterArgs {
            query: Some("item".into()),
            category: vec!["a".into()],
            max_price: Some(50.0),
            sort: SortMode::PriceAsc,
            ..FilterArgs::default()
        };
        let criteria = criteria_from_args(&args, &products);
        assert!((criteria.min_price - 12.0).abs() < f64::EPSILON);
        assert!((criteria.max_price - 50.0).abs() < f64::EPSILON);
        assert!(criteria.categories.is_selected("a"));
        assert_eq!(criteria.query, "item");
        assert_eq!(criteria.sort, SortMode::PriceAsc);
    }

    #[test]
    fn stars_round_to_nearest() {
        assert_eq!(stars(Rating { rate: 3.9, count: 1 }), "★★★★☆");
        assert_eq!(stars(Rating::ZERO), "☆☆☆☆☆");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(22.3), "$22.30");
        assert_eq!(money(695.0), "$695.00");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }
}
