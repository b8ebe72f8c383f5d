//! Remote store client.
//!
//! REST calls for document reads, merges and item operations, plus a
//! WebSocket watch channel per subscribed document. The server applies
//! merge semantics and assigns the strictly increasing versions carried
//! on watch frames.

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::watch;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{DocPath, DocumentFeed, ItemPath, ItemRecord, LogStore, Snapshot};
use crate::config::RemoteConfig;
use crate::error::StoreError;
use crate::models::Fields;

/// One frame on a document watch channel.
#[derive(Debug, Deserialize)]
struct WatchFrame {
    version: u64,
    doc: Option<Fields>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    id: String,
    #[serde(flatten)]
    fields: Fields,
}

/// [`LogStore`] backed by the hosted document store.
pub struct RemoteStore {
    config: RemoteConfig,
    http: reqwest::Client,
}

impl RemoteStore {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn doc_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url(), path)
    }

    /// Watch endpoint for a document, with the HTTP scheme swapped for
    /// the WebSocket one.
    fn watch_url(&self, path: &str) -> String {
        let base = self.config.base_url();
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        };
        format!(
            "{}/api/watch/{}?access_token={}",
            ws_base, path, self.config.api_key
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.config.api_key))
    }
}

#[async_trait]
impl LogStore for RemoteStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Fields>, StoreError> {
        let url = self.doc_url(&path.to_string());
        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Transport(format!(
                "GET {} returned status {}",
                url,
                response.status()
            )));
        }

        let fields: Fields = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(fields))
    }

    async fn merge(&self, path: &DocPath, fields: Fields) -> Result<(), StoreError> {
        let url = self.doc_url(&path.to_string());
        let response = self
            .authorized(self.http.patch(&url))
            .json(&fields)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::WriteRejected(format!(
                "PATCH {} returned status {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }

    async fn subscribe(&self, path: &DocPath) -> Result<DocumentFeed, StoreError> {
        // Seed the feed with the current document so the first delivery
        // does not wait for a frame from the server.
        let seed = Snapshot {
            version: 0,
            doc: self.get(path).await?,
        };
        let (tx, rx) = watch::channel(seed);

        let url = self.watch_url(&path.to_string());
        let (socket, _) = connect_async(url)
            .await
            .map_err(|e| StoreError::Transport(format!("watch connect failed: {}", e)))?;
        tracing::debug!("Watching {}", path);

        let doc_path = path.to_string();
        tokio::spawn(async move {
            let (_, mut read) = socket.split();
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => match serde_json::from_str::<WatchFrame>(text.as_str()) {
                        Ok(frame) => {
                            tx.send_replace(Snapshot {
                                version: frame.version,
                                doc: frame.doc,
                            });
                        }
                        Err(e) => {
                            tracing::warn!("Dropping malformed watch frame for {}: {}", doc_path, e);
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("Watch channel for {} failed: {}", doc_path, e);
                        break;
                    }
                }
            }
            // Dropping the sender terminates the feed; the consumer
            // sees SubscriptionClosed on its next wait.
        });

        Ok(DocumentFeed::new(rx))
    }

    async fn add_item(&self, path: &ItemPath, fields: Fields) -> Result<String, StoreError> {
        let url = self.doc_url(&path.to_string());
        let response = self
            .authorized(self.http.post(&url))
            .json(&fields)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::WriteRejected(format!(
                "POST {} returned status {}",
                url,
                response.status()
            )));
        }

        let created: CreatedResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(created.id)
    }

    async fn list_items(&self, path: &ItemPath) -> Result<Vec<ItemRecord>, StoreError> {
        let url = self.doc_url(&path.to_string());
        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(StoreError::Transport(format!(
                "GET {} returned status {}",
                url,
                response.status()
            )));
        }

        let items: Vec<WireItem> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(items
            .into_iter()
            .map(|item| ItemRecord {
                id: item.id,
                fields: item.fields,
            })
            .collect())
    }

    async fn remove_item(&self, path: &ItemPath, item_id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.doc_url(&path.to_string()), item_id);
        let response = self
            .authorized(self.http.delete(&url))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        // Deleting an already-deleted item is a no-op, matching the
        // in-memory store.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(StoreError::WriteRejected(format!(
                "DELETE {} returned status {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RemoteStore {
        RemoteStore::new(RemoteConfig::new("https://logs.example.com/", "secret").unwrap())
    }

    #[test]
    fn test_doc_url() {
        let url = store().doc_url("users/user-1/waterLogs/2026-03-02");
        assert_eq!(
            url,
            "https://logs.example.com/api/users/user-1/waterLogs/2026-03-02"
        );
    }

    #[test]
    fn test_watch_url_swaps_scheme() {
        let url = store().watch_url("users/user-1/waterLogs/2026-03-02");
        assert!(url.starts_with("wss://logs.example.com/api/watch/users/user-1/waterLogs/"));
        assert!(url.ends_with("access_token=secret"));

        let plain = RemoteStore::new(RemoteConfig::new("http://localhost:8080", "k").unwrap());
        assert!(plain.watch_url("x").starts_with("ws://localhost:8080/"));
    }

    #[test]
    fn test_watch_frame_decode() {
        let frame: WatchFrame =
            serde_json::from_str(r#"{"version": 12, "doc": {"total": 0.75}}"#).unwrap();
        assert_eq!(frame.version, 12);
        assert!(frame.doc.is_some());

        let absent: WatchFrame = serde_json::from_str(r#"{"version": 13, "doc": null}"#).unwrap();
        assert!(absent.doc.is_none());
    }
}
