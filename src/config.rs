use serde::Deserialize;

use crate::error::StoreError;

/// Connection settings for the remote log store.
///
/// There are no defaults on purpose: a missing server URL or API key is
/// a configuration error and must fail at construction time, not at the
/// first request.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the store, e.g. `https://logs.example.com`
    pub server_url: String,
    /// Bearer token sent with every request
    pub api_key: String,
}

impl RemoteConfig {
    /// Creates a config from explicit values, rejecting empty ones.
    pub fn new(
        server_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let server_url = server_url.into();
        let api_key = api_key.into();

        if server_url.trim().is_empty() {
            return Err(StoreError::Config("server_url is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(StoreError::Config("api_key is empty".to_string()));
        }

        Ok(Self {
            server_url,
            api_key,
        })
    }

    /// Loads configuration from `DAYLOG_SERVER_URL` and `DAYLOG_API_KEY`.
    pub fn from_env() -> Result<Self, StoreError> {
        let server_url = std::env::var("DAYLOG_SERVER_URL")
            .map_err(|_| StoreError::Config("DAYLOG_SERVER_URL is not set".to_string()))?;
        let api_key = std::env::var("DAYLOG_API_KEY")
            .map_err(|_| StoreError::Config("DAYLOG_API_KEY is not set".to_string()))?;

        Self::new(server_url, api_key)
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}
