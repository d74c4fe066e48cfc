//! Storage error types.

use thiserror::Error;

/// Errors raised by the receipt store and its storage slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage cannot be reached (disk error, missing
    /// permissions, unresolvable data directory).
    #[error("receipt storage is unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// The stored list (or a document being serialized) is not valid
    /// JSON. Reads degrade instead of surfacing this; see
    /// [`crate::store::ReceiptStore::list`].
    #[error("stored receipt data could not be decoded: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
