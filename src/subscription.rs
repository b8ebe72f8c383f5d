//! Cancellable per-document change subscription.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::StoreError;
use crate::store::{DocPath, LogStore, Snapshot};

/// Drives one document feed into a callback until cancelled.
///
/// The callback receives the current snapshot immediately, then every
/// later change. If the feed terminates abnormally the callback gets a
/// final `Err` before the subscription ends. Cancelling (or dropping)
/// guarantees the callback is never invoked again; cancelling twice is
/// a no-op.
pub struct ChangeSubscription {
    handle: Option<JoinHandle<()>>,
}

impl ChangeSubscription {
    /// Subscribes to `path` and starts delivering snapshots.
    pub async fn start<F>(
        store: Arc<dyn LogStore>,
        path: DocPath,
        mut on_change: F,
    ) -> Result<Self, StoreError>
    where
        F: FnMut(Result<Snapshot, StoreError>) + Send + 'static,
    {
        let mut feed = store.subscribe(&path).await?;

        let handle = tokio::spawn(async move {
            let current = feed.current();
            let mut last_version = current.version;
            on_change(Ok(current));
            loop {
                match feed.changed().await {
                    // A change that raced with subscribing can already be
                    // reflected in the initial snapshot; skip the echo.
                    Ok(snapshot) if snapshot.version == last_version => continue,
                    Ok(snapshot) => {
                        last_version = snapshot.version;
                        on_change(Ok(snapshot));
                    }
                    Err(e) => {
                        tracing::debug!("Subscription for {} ended: {}", path, e);
                        on_change(Err(e));
                        break;
                    }
                }
            }
        });

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Stops delivery. Takes effect before the next snapshot; safe to
    /// call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
