use std::path::PathBuf;

use thiserror::Error;

/// Error enums for the local key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O Error: {0}")]
    IO(#[from] std::io::Error),

    #[error("No home directory available!")]
    NoHome,

    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("Storage path is not a directory: {0}")]
    NotADirectory(PathBuf),
}
