//! Error types and result types for data access operations.
//!
//! Errors never cross the caller boundary directly: the operation set in
//! [`crate::access`] converts every [`AccessError`] into the error half of an
//! envelope. Use [`AccessResult<T>`] as the return type for fallible
//! operations below that boundary.

use std::time::Duration;

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible failures of a data access operation.
///
/// Note that "not found" is deliberately absent: for delete, update and drop
/// operations a missing document or collection is a successful outcome, not
/// an error (callers receive a null element or `true` instead).
#[derive(Error, Debug)]
pub enum AccessError {
    /// The store is unreachable or connection setup failed.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A supplied string could not be decoded into a native identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// The underlying store command failed; the store's message is passed through.
    #[error("Store operation failed: {0}")]
    Store(String),
    /// Serialization/deserialization error when converting document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An opt-in per-call deadline elapsed before the store responded.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// A specialized `Result` type for data access operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl From<BsonError> for AccessError {
    fn from(err: BsonError) -> Self {
        AccessError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for AccessError {
    fn from(err: SerdeJsonError) -> Self {
        AccessError::Serialization(err.to_string())
    }
}
