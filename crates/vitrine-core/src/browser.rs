// ── Browse session ──
//
// Owns one catalog snapshot plus the user's criteria and selection. Every
// mutation re-runs the filter engine and reconciliation explicitly, so the
// selection invariant holds after each call returns.

use std::sync::Arc;

use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::facets::{self, CategoryFacet, PriceBounds};
use crate::filter;
use crate::model::{Product, ProductId};
use crate::selection::{self, Direction};

#[derive(Debug, Clone)]
pub struct Browser {
    products: Arc<Vec<Arc<Product>>>,
    criteria: FilterCriteria,
    filtered: Vec<Arc<Product>>,
    selected: Option<ProductId>,
}

impl Browser {
    /// Start a session with default criteria fitted to the catalog's price
    /// range. The first product is selected.
    pub fn new(products: Arc<Vec<Arc<Product>>>) -> Self {
        let mut criteria = FilterCriteria::default();
        if let Some(bounds) = facets::price_bounds(&products) {
            criteria.fit_price_bounds(bounds);
        }
        Self::with_criteria(products, criteria)
    }

    /// Start a session with explicit criteria.
    pub fn with_criteria(products: Arc<Vec<Arc<Product>>>, criteria: FilterCriteria) -> Self {
        let mut browser = Self {
            products,
            criteria,
            filtered: Vec::new(),
            selected: None,
        };
        browser.recompute();
        browser
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The full snapshot, unfiltered.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// The visible list, filtered and ordered.
    pub fn filtered(&self) -> &[Arc<Product>] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selected_id(&self) -> Option<ProductId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Arc<Product>> {
        selection::find_selected(&self.filtered, self.selected)
    }

    /// 1-based position of the selection and the visible total.
    pub fn position(&self) -> Option<(usize, usize)> {
        let id = self.selected?;
        selection::position(&self.filtered, id).map(|i| (i + 1, self.filtered.len()))
    }

    /// Categories of the whole snapshot, for the filter controls.
    pub fn categories(&self) -> Vec<CategoryFacet> {
        facets::categories(&self.products)
    }

    pub fn price_bounds(&self) -> Option<PriceBounds> {
        facets::price_bounds(&self.products)
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Edit the criteria in place, then recompute.
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        edit(&mut self.criteria);
        self.recompute();
    }

    /// Back to defaults fitted to the catalog, keeping the selection if it
    /// is still visible.
    pub fn reset_criteria(&mut self) {
        let mut criteria = FilterCriteria::default();
        if let Some(bounds) = self.price_bounds() {
            criteria.fit_price_bounds(bounds);
        }
        self.set_criteria(criteria);
    }

    /// Step through the visible list, wrapping at both ends.
    pub fn navigate(&mut self, direction: Direction) -> Option<&Arc<Product>> {
        self.selected = selection::navigate(&self.filtered, self.selected, direction);
        self.selected()
    }

    /// Pick a product. An id outside the visible list is corrected by the
    /// reconciliation that follows.
    pub fn select(&mut self, id: ProductId) -> Option<&Arc<Product>> {
        self.selected = selection::select(id);
        self.selected = selection::reconcile(&self.filtered, self.selected);
        self.selected()
    }

    fn recompute(&mut self) {
        self.filtered = filter::apply(&self.products, &self.criteria);
        self.selected = selection::reconcile(&self.filtered, self.selected);
        debug!(
            visible = self.filtered.len(),
            total = self.products.len(),
            selected = ?self.selected,
            "recomputed catalog view"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::criteria::SortMode;
    use crate::model::Rating;
    use pretty_assertions::assert_eq;

    fn product(id: u64, price: f64, rate: f64, category: &str) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            description: format!("Description of item {id}"),
            category: category.into(),
            price,
            image: String::new(),
            rating: Some(Rating { rate, count: 3 }),
        })
    }

    fn catalog() -> Arc<Vec<Arc<Product>>> {
        Arc::new(vec![
            product(1, 10.5, 4.0, "a"),
            product(2, 30.0, 2.0, "b"),
            product(3, 20.0, 3.5, "a"),
        ])
    }

    fn visible_ids(browser: &Browser) -> Vec<u64> {
        browser.filtered().iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn new_fits_price_bounds_and_selects_first() {
        let browser = Browser::new(catalog());
        assert!((browser.criteria().min_price - 10.0).abs() < f64::EPSILON);
        assert!((browser.criteria().max_price - 30.0).abs() < f64::EPSILON);
        assert_eq!(visible_ids(&browser), vec![1, 2, 3]);
        assert_eq!(browser.selected_id(), Some(ProductId::new(1)));
        assert_eq!(browser.position(), Some((1, 3)));
    }

    #[test]
    fn empty_catalog_has_no_selection() {
        let browser = Browser::new(Arc::new(Vec::new()));
        assert!(browser.filtered().is_empty());
        assert!(browser.selected().is_none());
        assert!(browser.position().is_none());
    }

    #[test]
    fn filtering_out_selection_moves_it_to_first_visible() {
        let mut browser = Browser::new(catalog());
        browser.select(ProductId::new(2));
        browser.update_criteria(|c| c.categories.set("a", true));
        assert_eq!(visible_ids(&browser), vec![1, 3]);
        assert_eq!(browser.selected_id(), Some(ProductId::new(1)));
    }

    #[test]
    fn sorting_keeps_visible_selection() {
        let mut browser = Browser::new(catalog());
        browser.select(ProductId::new(3));
        browser.update_criteria(|c| c.sort = SortMode::PriceDesc);
        assert_eq!(visible_ids(&browser), vec![2, 3, 1]);
        assert_eq!(browser.selected_id(), Some(ProductId::new(3)));
        assert_eq!(browser.position(), Some((2, 3)));
    }

    #[test]
    fn no_match_clears_selection_and_reset_restores() {
        let mut browser = Browser::new(catalog());
        browser.update_criteria(|c| c.query = "nothing like this".into());
        assert!(browser.selected().is_none());

        browser.reset_criteria();
        assert_eq!(visible_ids(&browser), vec![1, 2, 3]);
        assert_eq!(browser.selected_id(), Some(ProductId::new(1)));
    }

    #[test]
    fn navigate_wraps_through_visible_list() {
        let mut browser = Browser::new(catalog());
        assert_eq!(browser.navigate(Direction::Prev).unwrap().id, ProductId::new(3));
        assert_eq!(browser.navigate(Direction::Next).unwrap().id, ProductId::new(1));
        assert_eq!(browser.navigate(Direction::Next).unwrap().id, ProductId::new(2));
    }

    #[test]
    fn selecting_hidden_product_is_corrected() {
        let mut browser = Browser::new(catalog());
        browser.update_criteria(|c| c.categories.set("b", true));
        let picked = browser.select(ProductId::new(1)).unwrap();
        assert_eq!(picked.id, ProductId::new(2));
    }

    #[test]
    fn facets_cover_whole_snapshot() {
        let mut browser = Browser::new(catalog());
        browser.update_criteria(|c| c.categories.set("b", true));
        let names: Vec<String> = browser.categories().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(browser.products().len(), 3);
    }
}
