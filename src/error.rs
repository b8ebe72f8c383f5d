//! Error types for the log store and the components built on it.

use thiserror::Error;

/// Errors surfaced by store operations and the layers above them.
///
/// Not-found is deliberately not an error: `LogStore::get` returns
/// `Ok(None)` for an absent document and callers supply the type
/// default themselves.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or invalid configuration (empty user id, no server URL).
    /// Raised immediately, never silently defaulted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or connection failure talking to the store.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store refused a write (non-success status, rejected merge).
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// A document feed terminated and will deliver no further snapshots.
    #[error("subscription closed: {0}")]
    SubscriptionClosed(String),

    /// A persisted document could not be decoded into its typed shape.
    #[error("failed to decode document: {0}")]
    Decode(String),

    /// A caller-supplied value is out of range or inconsistent.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
