//! Document store abstraction: one aggregate document per
//! (user, log type, day), merged field-wise, plus per-item food
//! collections and live per-document feeds.

mod memory;
mod path;
mod remote;

pub use memory::MemoryStore;
pub use path::{DocPath, ItemPath};
pub use remote::RemoteStore;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::StoreError;
use crate::models::Fields;

/// One delivery from a document feed.
///
/// `version` is assigned by the store and strictly increases with every
/// change it applies, so consumers can rely on never observing an older
/// snapshot after a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub version: u64,
    /// The document's fields, or `None` while it does not exist.
    pub doc: Option<Fields>,
}

/// A stored food item together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub fields: Fields,
}

/// Live feed of one document's snapshots.
///
/// Latest-value semantics: a slow consumer skips intermediate states
/// and always observes the most recent snapshot next.
#[derive(Debug)]
pub struct DocumentFeed {
    rx: watch::Receiver<Snapshot>,
}

impl DocumentFeed {
    pub(crate) fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// The snapshot as of now, available immediately after subscribing.
    pub fn current(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next change and returns the latest snapshot.
    ///
    /// Returns `SubscriptionClosed` once the feed has terminated; no
    /// further snapshots will ever be delivered after that.
    pub async fn changed(&mut self) -> Result<Snapshot, StoreError> {
        self.rx
            .changed()
            .await
            .map_err(|_| StoreError::SubscriptionClosed("document feed ended".to_string()))?;
        Ok(self.rx.borrow_and_update().clone())
    }
}

/// Read/write/merge access to per-day log documents.
///
/// Implemented by [`MemoryStore`] for in-process use and tests, and by
/// [`RemoteStore`] for the hosted document store.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Fetches one aggregate document. Absent is `Ok(None)`, never an
    /// error.
    async fn get(&self, path: &DocPath) -> Result<Option<Fields>, StoreError>;

    /// Writes only the supplied fields, creating the document if it
    /// does not exist. Fields not supplied are left untouched, so
    /// concurrent writers to different fields both survive; the same
    /// field is last-write-wins.
    async fn merge(&self, path: &DocPath, fields: Fields) -> Result<(), StoreError>;

    /// Opens a live feed for one document. The current snapshot is
    /// available immediately; every later change to the document is
    /// delivered monotonically by version.
    async fn subscribe(&self, path: &DocPath) -> Result<DocumentFeed, StoreError>;

    /// Appends one item to a day's meal collection, returning its id.
    async fn add_item(&self, path: &ItemPath, fields: Fields) -> Result<String, StoreError>;

    /// Lists a day's meal collection in insertion order.
    async fn list_items(&self, path: &ItemPath) -> Result<Vec<ItemRecord>, StoreError>;

    /// Removes one item by id. Removing an id that does not exist is a
    /// no-op.
    async fn remove_item(&self, path: &ItemPath, item_id: &str) -> Result<(), StoreError>;
}
