//! In-process store implementation.
//!
//! Backs tests and local/offline use with the same merge and feed
//! semantics as the remote store: shallow field-wise merge, one watch
//! channel per subscribed document, store-wide increasing versions.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use super::{DocPath, DocumentFeed, ItemPath, ItemRecord, LogStore, Snapshot};
use crate::error::StoreError;
use crate::models::Fields;

#[derive(Default)]
struct Inner {
    docs: BTreeMap<String, Fields>,
    items: BTreeMap<String, Vec<ItemRecord>>,
    feeds: HashMap<String, watch::Sender<Snapshot>>,
    version: u64,
}

/// In-memory [`LogStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for MemoryStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Fields>, StoreError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.docs.get(&path.to_string()).cloned())
    }

    async fn merge(&self, path: &DocPath, fields: Fields) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let key = path.to_string();

        let doc = inner.docs.entry(key.clone()).or_default();
        for (field, value) in fields {
            doc.insert(field, value);
        }
        let doc = doc.clone();

        inner.version += 1;
        let snapshot = Snapshot {
            version: inner.version,
            doc: Some(doc),
        };
        if let Some(tx) = inner.feeds.get(&key) {
            // send_replace also works with no active receivers
            tx.send_replace(snapshot);
        }
        Ok(())
    }

    async fn subscribe(&self, path: &DocPath) -> Result<DocumentFeed, StoreError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let key = path.to_string();

        let initial = Snapshot {
            version: inner.version,
            doc: inner.docs.get(&key).cloned(),
        };
        let tx = inner
            .feeds
            .entry(key)
            .or_insert_with(|| watch::channel(initial).0);
        Ok(DocumentFeed::new(tx.subscribe()))
    }

    async fn add_item(&self, path: &ItemPath, fields: Fields) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let id = Uuid::new_v4().to_string();
        inner
            .items
            .entry(path.to_string())
            .or_default()
            .push(ItemRecord {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn list_items(&self, path: &ItemPath) -> Result<Vec<ItemRecord>, StoreError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.items.get(&path.to_string()).cloned().unwrap_or_default())
    }

    async fn remove_item(&self, path: &ItemPath, item_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        if let Some(records) = inner.items.get_mut(&path.to_string()) {
            records.retain(|record| record.id != item_id);
        }
        Ok(())
    }
}
