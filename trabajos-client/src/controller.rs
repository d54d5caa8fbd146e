//! Optimistic sync controller
//!
//! Owns the list the UI renders and keeps it in step with the store:
//!
//! - drag moves run through the reorder reducer, are shown immediately and
//!   then persisted as a full `{id, order}` mapping;
//! - a failed persist raises one error notification and replaces the list
//!   with a fresh fetch;
//! - create / update / delete / duplicate go to the store first and
//!   re-fetch afterwards, with no optimistic step.
//!
//! Only one reorder may be in flight; moves arriving meanwhile are refused.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use shared::models::{Item, ItemCreate, ItemUpdate, OrderEntry};
use shared::reorder::{MoveRequest, Reorder, apply_move, order_entries};
use shared::validation::{validate_item_create, validate_item_update};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_NOTIFICATION_CAPACITY;
use crate::notify::{self, Notification, Notifier};
use crate::state::ListState;
use crate::store::{HttpItemStore, ItemStore};
use crate::{ClientConfig, ClientError, ClientResult};

/// What happened to a move event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The move does not change the arrangement; nothing was sent
    Unchanged,
    /// The store accepted the new arrangement
    Confirmed,
    /// The store refused or was unreachable; the list was reloaded
    Reverted,
    /// Another reorder is still in flight; the move was ignored
    Busy,
}

/// Result of the persistence phase of a reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Confirmed,
    /// Local state can no longer be trusted and must be re-fetched
    ReloadRequired,
}

/// Holds the in-flight flag until dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SyncController<S> {
    store: S,
    state: RwLock<ListState>,
    reorder_in_flight: AtomicBool,
    notifier: Notifier,
}

impl SyncController<HttpItemStore> {
    /// Controller over the HTTP store described by `config`
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let store = HttpItemStore::from_config(config)?;
        Ok(Self::with_notifier(
            store,
            Notifier::new(config.notification_capacity),
        ))
    }
}

impl<S: ItemStore> SyncController<S> {
    pub fn new(store: S) -> Self {
        Self::with_notifier(store, Notifier::new(DEFAULT_NOTIFICATION_CAPACITY))
    }

    pub fn with_notifier(store: S, notifier: Notifier) -> Self {
        Self {
            store,
            state: RwLock::new(ListState::default()),
            reorder_in_flight: AtomicBool::new(false),
            notifier,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Snapshot of the list, sorted by order
    pub fn items(&self) -> Vec<Item> {
        self.state.read().items().to_vec()
    }

    pub fn is_reordering(&self) -> bool {
        self.reorder_in_flight.load(Ordering::Acquire)
    }

    /// Load the list from the store
    ///
    /// Returns whether the fetched list was applied (`false` when a newer
    /// write superseded it or a reorder is awaiting the store; that reorder
    /// fetches again once it settles). Failures raise an error notification.
    pub async fn refresh(&self) -> ClientResult<bool> {
        self.fetch().await.inspect_err(|e| {
            warn!(error = %e, "Failed to load items");
            self.notifier.error(notify::MSG_LOAD_FAILED);
        })
    }

    async fn fetch(&self) -> ClientResult<bool> {
        let ticket = self.state.write().issue();
        let items = self.store.list().await?;

        let applied = self.state.write().reconcile(items, ticket);
        if !applied {
            debug!(ticket, "Discarding stale item list");
        }
        Ok(applied)
    }

    /// Handle a drop from the drag surface
    pub async fn move_item(&self, mv: MoveRequest) -> ReorderOutcome {
        let Some(_guard) = InFlightGuard::try_acquire(&self.reorder_in_flight) else {
            debug!(source_id = mv.source_id, "Reorder already in flight, ignoring move");
            return ReorderOutcome::Busy;
        };

        let entries = {
            let mut state = self.state.write();
            match apply_move(state.items(), mv) {
                Reorder::Unchanged => return ReorderOutcome::Unchanged,
                Reorder::Moved(candidate) => {
                    let entries = order_entries(&candidate);
                    state.apply_candidate(candidate);
                    entries
                }
            }
        };

        let outcome = self.persist(&entries).await;
        let missed_fetch = self.state.write().settle();

        match outcome {
            PersistOutcome::Confirmed => {
                self.notifier.success(notify::MSG_REORDER_OK);
                // A fetch held back during the write may carry other changes
                if missed_fetch && let Err(e) = self.fetch().await {
                    warn!(error = %e, "Reload after confirmed reorder failed");
                }
                ReorderOutcome::Confirmed
            }
            PersistOutcome::ReloadRequired => {
                self.notifier.error(notify::MSG_REORDER_FAILED);
                if let Err(e) = self.fetch().await {
                    warn!(error = %e, "Reload after failed reorder also failed");
                }
                ReorderOutcome::Reverted
            }
        }
    }

    async fn persist(&self, entries: &[OrderEntry]) -> PersistOutcome {
        match self.store.reorder(entries).await {
            Ok(updated) => {
                info!(updated, "Reorder persisted");
                PersistOutcome::Confirmed
            }
            Err(e) => {
                warn!(error = %e, "Reorder was not persisted");
                PersistOutcome::ReloadRequired
            }
        }
    }

    /// Validate, create and reload
    ///
    /// Invalid payloads are returned as [`ClientError::Validation`] without
    /// contacting the store.
    pub async fn create(&self, data: ItemCreate) -> ClientResult<Item> {
        validate_item_create(&data).map_err(ClientError::Validation)?;

        let created = self
            .store
            .create(&data)
            .await
            .inspect_err(|e| self.report_failure(e, notify::MSG_CREATE_FAILED))?;
        self.notifier.success(notify::MSG_CREATE_OK);
        self.reload().await;
        Ok(created)
    }

    /// Validate, update and reload
    pub async fn update(&self, id: i64, data: ItemUpdate) -> ClientResult<Item> {
        validate_item_update(&data).map_err(ClientError::Validation)?;

        let updated = self
            .store
            .update(id, &data)
            .await
            .inspect_err(|e| self.report_failure(e, notify::MSG_UPDATE_FAILED))?;
        self.notifier.success(notify::MSG_UPDATE_OK);
        self.reload().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.store
            .delete(id)
            .await
            .inspect_err(|e| self.report_failure(e, notify::MSG_DELETE_FAILED))?;
        self.notifier.success(notify::MSG_DELETE_OK);
        self.reload().await;
        Ok(())
    }

    /// Create a copy of a listed item, appended at the end of the list
    pub async fn duplicate(&self, id: i64) -> ClientResult<Item> {
        let source = self
            .state
            .read()
            .items()
            .iter()
            .find(|item| item.id == id)
            .cloned();
        let Some(source) = source else {
            let err = ClientError::NotFound(format!("Item {id} is not in the list"));
            self.report_failure(&err, notify::MSG_DUPLICATE_FAILED);
            return Err(err);
        };

        let payload = source.duplicate_payload();
        if let Err(e) = validate_item_create(&payload) {
            let err = ClientError::Validation(e);
            self.report_failure(&err, notify::MSG_DUPLICATE_FAILED);
            return Err(err);
        }

        let created = self
            .store
            .create(&payload)
            .await
            .inspect_err(|e| self.report_failure(e, notify::MSG_DUPLICATE_FAILED))?;
        self.notifier.success(notify::MSG_DUPLICATE_OK);
        self.reload().await;
        Ok(created)
    }

    // Errors are reported by refresh itself
    async fn reload(&self) {
        let _ = self.refresh().await;
    }

    fn report_failure(&self, error: &ClientError, message: &str) {
        warn!(error = %error, "{message}");
        self.notifier.error(message);
    }
}
