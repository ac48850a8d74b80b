//! Error types for the kanban engine

use crate::ledger::LedgerError;
use taskboard_store::StoreError;
use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Coarse classification callers map to responses and retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced item or container does not exist. Do not retry.
    NotFound,
    /// Timeout, slot wait exceeded or conflict. Safe to retry the whole call.
    Transient,
    /// The request would break the ordering invariant. Nothing was written.
    InvariantViolation,
    /// Malformed request
    Invalid,
    Internal,
}

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Card not found
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Generic resource not found (attachments, etc.)
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Target position outside the valid range for the move
    #[error("position {position} is out of range (max {max})")]
    PositionOutOfRange { position: u32, max: u32 },

    /// The item is not in the container the caller said it was in
    #[error("{id} is in {actual}, not {expected}")]
    ContainerMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    /// Reorder batch is not a valid dense ordering
    #[error("invalid reorder: {message}")]
    InvalidReorder { message: String },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Column has cards and cannot be deleted
    #[error("column '{id}' has {count} cards and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Retryable store failure; nothing was applied
    #[error("transient store failure: {0}")]
    Transient(#[source] StoreError),

    /// Non-retryable store failure
    #[error("store error: {0}")]
    Store(#[source] StoreError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create an invalid reorder error
    pub fn invalid_reorder(message: impl Into<String>) -> Self {
        Self::InvalidReorder {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not found error for a nested resource
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CardNotFound { .. } | Self::ColumnNotFound { .. } | Self::NotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Transient(_) => ErrorKind::Transient,
            Self::PositionOutOfRange { .. }
            | Self::ContainerMismatch { .. }
            | Self::InvalidReorder { .. }
            | Self::ColumnNotEmpty { .. } => ErrorKind::InvariantViolation,
            Self::DuplicateId { .. } | Self::InvalidValue { .. } => ErrorKind::Invalid,
            Self::Store(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

impl From<StoreError> for KanbanError {
    fn from(error: StoreError) -> Self {
        if error.is_transient() {
            Self::Transient(error)
        } else {
            Self::Store(error)
        }
    }
}

impl From<LedgerError> for KanbanError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::OutOfRange { position, max } => {
                Self::PositionOutOfRange { position, max }
            }
            other => Self::invalid_reorder(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::CardNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "card not found: abc123");
    }

    #[test]
    fn test_store_errors_split_by_transience() {
        let err = KanbanError::from(StoreError::Timeout { timeout_ms: 10 });
        assert!(err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Transient);

        let err = KanbanError::from(StoreError::DuplicateId { id: "x".into() });
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_ledger_errors() {
        let err = KanbanError::from(LedgerError::OutOfRange {
            position: 9,
            max: 3,
        });
        assert!(matches!(
            err,
            KanbanError::PositionOutOfRange { position: 9, max: 3 }
        ));

        let err = KanbanError::from(LedgerError::Duplicate { position: 1 });
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert!(err.to_string().contains("position 1"));
    }
}
