//! List state container
//!
//! The only copy of the item list the UI renders. Two mutation entry points:
//! [`ListState::apply_candidate`] for optimistic updates and
//! [`ListState::reconcile`] for authoritative lists fetched from the store.
//! Both leave `items` sorted by order.
//!
//! While a candidate awaits the store's answer, fetched lists are held back:
//! they may predate the write. [`ListState::settle`] reports whether one was
//! dropped so the caller can fetch again once the outcome is known.

use shared::models::Item;
use shared::reorder::sort_by_order;

/// Ticket ordering writes to the list; larger is newer
pub type Ticket = u64;

#[derive(Debug, Default)]
pub struct ListState {
    items: Vec<Item>,
    /// Last ticket handed out
    issued: Ticket,
    /// Ticket of the write currently shown
    applied: Ticket,
    /// Candidate shown but not yet confirmed by the store
    pending: Option<Ticket>,
    /// A fetch was dropped while `pending` was set
    missed_fetch: bool,
}

impl ListState {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Ticket of the write currently shown
    pub fn applied_ticket(&self) -> Ticket {
        self.applied
    }

    /// Reserve a ticket for a fetch that is about to start
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        self.issued
    }

    /// Show a locally computed list before the store confirms it
    ///
    /// `candidate` must be the reducer output (positionally numbered).
    /// Supersedes every fetch still in flight and stays pending until
    /// [`ListState::settle`].
    pub fn apply_candidate(&mut self, candidate: Vec<Item>) -> Ticket {
        let ticket = self.issue();
        self.items = candidate;
        self.applied = ticket;
        self.pending = Some(ticket);
        self.missed_fetch = false;
        ticket
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The store answered the pending candidate
    ///
    /// Returns `true` when a fetch was dropped meanwhile and the list must be
    /// fetched again.
    pub fn settle(&mut self) -> bool {
        self.pending = None;
        std::mem::take(&mut self.missed_fetch)
    }

    /// Replace the list wholesale with one fetched under `ticket`
    ///
    /// Returns `false` and leaves the state untouched when a newer ticket has
    /// been issued since, or while a candidate is pending.
    pub fn reconcile(&mut self, mut fetched: Vec<Item>, ticket: Ticket) -> bool {
        if ticket != self.issued {
            return false;
        }
        if self.pending.is_some() {
            self.missed_fetch = true;
            return false;
        }
        sort_by_order(&mut fetched);
        self.items = fetched;
        self.applied = ticket;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, order: i32) -> Item {
        Item {
            id,
            name: format!("item-{id}"),
            description: None,
            order,
            form_fields: vec![],
            created_at: 0,
            updated_at: 0,
        }
    }

    fn ids(state: &ListState) -> Vec<i64> {
        state.items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_reconcile_sorts_by_order() {
        let mut state = ListState::default();
        let ticket = state.issue();
        assert!(state.reconcile(vec![item(3, 3), item(1, 1), item(2, 2)], ticket));
        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert_eq!(state.applied_ticket(), ticket);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut state = ListState::default();
        let old = state.issue();
        let new = state.issue();

        assert!(state.reconcile(vec![item(2, 1)], new));
        assert!(!state.reconcile(vec![item(9, 1)], old));
        assert_eq!(ids(&state), vec![2]);
    }

    #[test]
    fn test_candidate_supersedes_inflight_fetch() {
        let mut state = ListState::default();
        let fetch = state.issue();
        state.apply_candidate(vec![item(2, 1), item(1, 2)]);

        assert!(!state.reconcile(vec![item(1, 1), item(2, 2)], fetch));
        assert_eq!(ids(&state), vec![2, 1]);
    }

    #[test]
    fn test_fetch_during_pending_candidate_is_held_back() {
        let mut state = ListState::default();
        state.apply_candidate(vec![item(2, 1), item(1, 2)]);
        assert!(state.is_pending());

        let fetch = state.issue();
        assert!(!state.reconcile(vec![item(1, 1), item(2, 2)], fetch));
        assert_eq!(ids(&state), vec![2, 1]);

        assert!(state.settle());
        assert!(!state.is_pending());
        assert!(!state.settle());

        let fetch = state.issue();
        assert!(state.reconcile(vec![item(1, 2), item(2, 1)], fetch));
        assert_eq!(ids(&state), vec![2, 1]);
    }

    #[test]
    fn test_settle_without_dropped_fetch() {
        let mut state = ListState::default();
        state.apply_candidate(vec![item(1, 1)]);
        assert!(!state.settle());
    }
}
