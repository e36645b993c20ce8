//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Book store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Book not found: {0}")]
    NotFound(i64),

    #[error("Book store lock poisoned")]
    Poisoned,
}
