//! Ordering helpers for the drag-and-drop sortable lists.
//!
//! A collection is always displayed sorted by its `order` field. Dragging an
//! item produces a new sequence through a single-element move, after which
//! every item's `order` is rewritten to its index in that sequence.

use std::collections::HashSet;

/// Move the element at `from` so it ends up at `to`, shifting the elements in
/// between by one. Other elements keep their relative order. `to` past the
/// end is clamped to the last slot.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let to = to.min(items.len() - 1);
    if from == to {
        return;
    }

    let item = items.remove(from);
    items.insert(to, item);
}

/// Pair every id with its new 0-based `order`.
pub fn order_assignments(ids: &[i64]) -> Vec<(i64, i64)> {
    ids.iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i64))
        .collect()
}

/// True when `requested` names every id in `existing` exactly once.
pub fn is_permutation(existing: &[i64], requested: &[i64]) -> bool {
    if existing.len() != requested.len() {
        return false;
    }

    let existing: HashSet<i64> = existing.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());

    requested
        .iter()
        .all(|id| existing.contains(id) && seen.insert(*id))
}
