// ── Selection manager ──
//
// Keeps a selected product id consistent with a filtered list that changes
// underneath it. After `reconcile`, a non-empty list always has a selected
// member and an empty list never has a selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{Product, ProductId};

/// Direction of a rail step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// Restore the selection invariant against `filtered`.
///
/// - empty list: no selection
/// - nothing selected, or the selection fell out of the list: first product
/// - otherwise the current selection stands
pub fn reconcile(filtered: &[Arc<Product>], current: Option<ProductId>) -> Option<ProductId> {
    let first = filtered.first()?;
    match current {
        Some(id) if position(filtered, id).is_some() => Some(id),
        _ => Some(first.id),
    }
}

/// Step the selection one place, wrapping around both ends.
///
/// A no-op when the list is empty or the current selection is not in it.
pub fn navigate(
    filtered: &[Arc<Product>],
    current: Option<ProductId>,
    direction: Direction,
) -> Option<ProductId> {
    let Some(id) = current else {
        return current;
    };
    let Some(index) = position(filtered, id) else {
        return current;
    };

    let len = filtered.len();
    let next = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Prev => (index + len - 1) % len,
    };
    filtered.get(next).map(|p| p.id)
}

/// Explicit pick. Not validated here; the next `reconcile` corrects an id
/// that is not in the current list.
pub fn select(id: ProductId) -> Option<ProductId> {
    Some(id)
}

/// Look up the selected product in `filtered`.
pub fn find_selected(filtered: &[Arc<Product>], selected: Option<ProductId>) -> Option<&Arc<Product>> {
    let id = selected?;
    filtered.iter().find(|p| p.id == id)
}

/// Index of `id` in `filtered`.
pub fn position(filtered: &[Arc<Product>], id: ProductId) -> Option<usize> {
    filtered.iter().position(|p| p.id == id)
}
