//! Drag-and-drop reorder reducer
//!
//! Pure list arithmetic shared by the store and its clients: move one item
//! onto another item's slot and renumber the whole collection `1..N`.
//!
//! ```
//! use shared::models::OrderEntry;
//! use shared::reorder::{apply_move, MoveRequest, Reorder};
//!
//! let items = vec![
//!     OrderEntry { id: 1, order: 1 },
//!     OrderEntry { id: 2, order: 2 },
//!     OrderEntry { id: 3, order: 3 },
//! ];
//! let Reorder::Moved(moved) = apply_move(&items, MoveRequest::new(1, 3)) else {
//!     panic!("expected a move");
//! };
//! let ids: Vec<i64> = moved.iter().map(|e| e.id).collect();
//! assert_eq!(ids, vec![2, 3, 1]);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Item, OrderEntry};

/// Anything with a stable identity and a mutable rank
pub trait Ordered {
    fn id(&self) -> i64;
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

impl Ordered for Item {
    fn id(&self) -> i64 {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl Ordered for OrderEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

/// Move event emitted by the drag surface
///
/// `target_id` is `None` when the pointer was released outside any row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub source_id: i64,
    pub target_id: Option<i64>,
}

impl MoveRequest {
    pub fn new(source_id: i64, target_id: i64) -> Self {
        Self {
            source_id,
            target_id: Some(target_id),
        }
    }

    /// Drop outside of any row
    pub fn dropped_outside(source_id: i64) -> Self {
        Self {
            source_id,
            target_id: None,
        }
    }
}

/// Result of running the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Reorder<T> {
    /// The move does not change the arrangement; callers must not persist
    Unchanged,
    /// The new arrangement, renumbered `1..N` by position
    Moved(Vec<T>),
}

impl<T> Reorder<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Reorder::Unchanged)
    }
}

/// Apply a move to a list already sorted by order
///
/// The source item is removed and reinserted at the index the target
/// occupied before the removal, then every item gets `order = position + 1`.
/// Missing source, missing target and self-moves are no-ops.
pub fn apply_move<T: Ordered + Clone>(items: &[T], mv: MoveRequest) -> Reorder<T> {
    let Some(target_id) = mv.target_id else {
        return Reorder::Unchanged;
    };
    if target_id == mv.source_id {
        return Reorder::Unchanged;
    }

    let Some(from) = position_of(items, mv.source_id) else {
        return Reorder::Unchanged;
    };
    let Some(to) = position_of(items, target_id) else {
        return Reorder::Unchanged;
    };

    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    renumber(&mut next);
    Reorder::Moved(next)
}

/// Zero-based index of the item with `id`
pub fn position_of<T: Ordered>(items: &[T], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Assign `order = position + 1` to every item
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as i32 + 1);
    }
}

/// Sort ascending by order; ties fall back to id so the result is stable
/// across fetches
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.id().cmp(&b.id())));
}

/// Project a list onto the `{id, order}` pairs sent to the store
pub fn order_entries<T: Ordered>(items: &[T]) -> Vec<OrderEntry> {
    items
        .iter()
        .map(|item| OrderEntry {
            id: item.id(),
            order: item.order(),
        })
        .collect()
}

/// Orders are exactly `1..N` in list position order
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() == index as i32 + 1)
}

/// Two lists hold the same ids at the same positions with the same orders
pub fn same_arrangement<A: Ordered, B: Ordered>(a: &[A], b: &[B]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.id() == y.id() && x.order() == y.order())
}
