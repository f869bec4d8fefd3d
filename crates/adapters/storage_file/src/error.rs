//! Storage-specific error type wrapping filesystem and JSON errors.

use lumo_domain::error::LumoError;

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing, or replacing the state file failed.
    #[error("state file I/O error")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the record.
    #[error("state serialization error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for LumoError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
