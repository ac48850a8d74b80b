//! Error types for the record store

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur inside a store transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No transaction slot became free within `max_wait`
    #[error("timed out after {waited_ms}ms waiting for a transaction slot")]
    WaitTimeout { waited_ms: u64 },

    /// The transaction ran past its execution timeout
    #[error("transaction exceeded its {timeout_ms}ms timeout")]
    Timeout { timeout_ms: u64 },

    /// Commit rejected because of a concurrent change
    #[error("transaction conflict: {message}")]
    Conflict { message: String },

    /// Record not found
    #[error("record not found: {id}")]
    NotFound { id: String },

    /// Record with this ID already exists
    #[error("duplicate record id: {id}")]
    DuplicateId { id: String },

    /// A decrement would have pushed a record below position 0
    #[error("shift would move record {id} below position 0")]
    PositionUnderflow { id: String },
}

impl StoreError {
    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Whether retrying the whole transaction may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::WaitTimeout { .. } | Self::Timeout { .. } | Self::Conflict { .. }
        )
    }
}
