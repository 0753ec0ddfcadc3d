//! Database error types.

use thiserror::Error;

/// Document store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to connect to the store.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// A read or write against the store failed.
    #[error("query failed: {0}")]
    Query(#[source] mongodb::error::Error),

    /// The store acknowledged an insert without returning an object ID.
    #[error("insert did not return an object id")]
    MissingInsertedId,

    /// A freshly inserted document could not be read back.
    #[error("document {0} was not readable after insert")]
    NotPersisted(String),

    /// The store refused service.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
