//! Optimistic reconciliation of local edits with the remote document.
//!
//! A UI tap is reflected locally at once, the merge is issued in the
//! background, and incoming feed snapshots are only adopted when they
//! do not undo an in-flight write. A snapshot versioned past the edit
//! supersedes the write and is applied when the acknowledgement lands.
//! On a failed write the local value rolls back and the error is
//! returned to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::models::{from_fields, to_fields, BowelLog, Fields, WaterLog};
use crate::store::{DocPath, LogStore, Snapshot};

/// A per-day value that can be edited optimistically: it knows how to
/// combine itself with a delta and how to travel as merge fields.
pub trait OptimisticValue: Clone + PartialEq + Send + Sync + 'static {
    type Delta: Send;

    /// Combines the current value with a local edit.
    fn apply(&self, delta: &Self::Delta) -> Self;

    /// Fields carried by the merge write for this value.
    fn merge_fields(&self) -> Result<Fields, StoreError>;

    /// Decodes a stored document back into the value.
    fn from_fields(fields: &Fields) -> Result<Self, StoreError>;

    /// The value an absent document represents.
    fn absent() -> Self;
}

impl OptimisticValue for WaterLog {
    type Delta = f64;

    fn apply(&self, delta: &f64) -> Self {
        WaterLog {
            total: (self.total + delta).max(0.0),
        }
    }

    fn merge_fields(&self) -> Result<Fields, StoreError> {
        to_fields(self)
    }

    fn from_fields(fields: &Fields) -> Result<Self, StoreError> {
        from_fields(fields)
    }

    fn absent() -> Self {
        WaterLog { total: 0.0 }
    }
}

impl OptimisticValue for BowelLog {
    type Delta = i32;

    fn apply(&self, delta: &i32) -> Self {
        let total = i64::from(self.total) + i64::from(*delta);
        BowelLog {
            total: total.clamp(0, i64::from(u32::MAX)) as u32,
        }
    }

    fn merge_fields(&self) -> Result<Fields, StoreError> {
        to_fields(self)
    }

    fn from_fields(fields: &Fields) -> Result<Self, StoreError> {
        from_fields(fields)
    }

    fn absent() -> Self {
        BowelLog { total: 0 }
    }
}

enum Slot<V> {
    Synced(V),
    Pending {
        local: V,
        previous: V,
        generation: u64,
        /// Feed version already seen when the edit was applied. Anything
        /// at or below it is a pre-write echo.
        baseline: u64,
        /// Latest snapshot versioned past `baseline`; it supersedes the
        /// pending write and settles the slot on completion.
        deferred: Option<V>,
    },
}

impl<V: Clone> Slot<V> {
    fn current(&self) -> V {
        match self {
            Slot::Synced(value) => value.clone(),
            Slot::Pending { local, .. } => local.clone(),
        }
    }
}

struct State<V> {
    slot: Slot<V>,
    feed_version: u64,
}

/// Reconciles one document slot between local edits and the remote
/// feed. One coordinator per (user, log type, date).
pub struct OptimisticUpdateCoordinator<V: OptimisticValue> {
    store: Arc<dyn LogStore>,
    path: DocPath,
    state: Mutex<State<V>>,
    generation: AtomicU64,
}

impl<V: OptimisticValue> OptimisticUpdateCoordinator<V> {
    pub fn new(store: Arc<dyn LogStore>, path: DocPath, initial: V) -> Self {
        Self {
            store,
            path,
            state: Mutex::new(State {
                slot: Slot::Synced(initial),
                feed_version: 0,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Builds a coordinator seeded from the document's stored state.
    pub async fn load(store: Arc<dyn LogStore>, path: DocPath) -> Result<Self, StoreError> {
        let initial = match store.get(&path).await? {
            Some(fields) => V::from_fields(&fields)?,
            None => V::absent(),
        };
        Ok(Self::new(store, path, initial))
    }

    /// The value the UI should display right now: the optimistic local
    /// value while a write is pending, the synced value otherwise.
    pub fn value(&self) -> V {
        self.state.lock().expect("slot lock poisoned").slot.current()
    }

    /// Applies a local edit, reflecting it immediately, and issues the
    /// merge. Returns the value the slot settles on: the new local
    /// value, or a newer remote state that arrived while the write was
    /// in flight. On failure the slot rolls back to its pre-edit value
    /// (or that newer remote state) and the error propagates.
    pub async fn apply(&self, delta: V::Delta) -> Result<V, StoreError> {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        let (local, fields) = {
            let mut state = self.state.lock().expect("slot lock poisoned");
            let previous = state.slot.current();
            let local = previous.apply(&delta);
            let fields = local.merge_fields()?;
            state.slot = Slot::Pending {
                local: local.clone(),
                previous,
                generation,
                baseline: state.feed_version,
                deferred: None,
            };
            (local, fields)
        };

        match self.store.merge(&self.path, fields).await {
            Ok(()) => {
                let mut state = self.state.lock().expect("slot lock poisoned");
                let settled = match &state.slot {
                    Slot::Pending {
                        generation: g,
                        deferred,
                        ..
                    } if *g == generation => {
                        // A snapshot versioned past this edit supersedes
                        // the acknowledged write.
                        Some(deferred.clone().unwrap_or_else(|| local.clone()))
                    }
                    // A newer local edit owns the slot now; its own
                    // completion will settle the state.
                    _ => None,
                };
                match settled {
                    Some(value) => {
                        state.slot = Slot::Synced(value.clone());
                        Ok(value)
                    }
                    None => Ok(local),
                }
            }
            Err(e) => {
                let mut state = self.state.lock().expect("slot lock poisoned");
                let rollback = match &state.slot {
                    Slot::Pending {
                        generation: g,
                        previous,
                        deferred,
                        ..
                    } if *g == generation => {
                        Some(deferred.clone().unwrap_or_else(|| previous.clone()))
                    }
                    _ => None,
                };
                if let Some(value) = rollback {
                    tracing::warn!(
                        "Merge for {} failed, rolling back local value: {}",
                        self.path,
                        e
                    );
                    state.slot = Slot::Synced(value);
                }
                Err(e)
            }
        }
    }

    /// Feeds a subscription snapshot into the slot.
    ///
    /// When synced, the remote value is authoritative and adopted.
    /// While a write is pending, a snapshot equal to the in-flight
    /// local value settles the slot (a confirmation that raced ahead of
    /// the acknowledgement); one versioned past the edit is kept aside
    /// and applied when the write completes; anything older is a stale
    /// pre-write echo and is dropped, so the UI never snaps back.
    pub fn observe(&self, snapshot: &Snapshot) {
        let remote = match &snapshot.doc {
            Some(fields) => match V::from_fields(fields) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Ignoring undecodable snapshot for {}: {}", self.path, e);
                    return;
                }
            },
            None => V::absent(),
        };

        let mut state = self.state.lock().expect("slot lock poisoned");
        if snapshot.version > state.feed_version {
            state.feed_version = snapshot.version;
        }
        let adopt = match &mut state.slot {
            Slot::Synced(_) => true,
            Slot::Pending {
                local,
                baseline,
                deferred,
                ..
            } => {
                if remote == *local {
                    true
                } else {
                    if snapshot.version > *baseline {
                        *deferred = Some(remote.clone());
                    }
                    false
                }
            }
        };
        if adopt {
            state.slot = Slot::Synced(remote);
        }
    }
}
