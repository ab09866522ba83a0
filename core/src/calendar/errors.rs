use thiserror::Error;

use crate::storage::errors::StorageError;

/// Error enums for calendar operations.
#[derive(Debug, Error)]
pub enum ErrorType {
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Stored events that fail to parse are fatal at load time
    #[error("Malformed event data: {0}")]
    Json(#[from] serde_json::Error),
}
