use actorstats_core::error::CoreError;

/// Errors raised by object-store backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No object exists at the requested location.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The bucket or key cannot be mapped to a location in this backend.
    #[error("invalid object path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote object store returned an error.
    #[error("object store error: {0}")]
    Service(String),

    #[error("invalid storage configuration: {0}")]
    Configuration(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => CoreError::NotFound {
                entity: "Blob",
                key,
            },
            StorageError::InvalidPath(msg) | StorageError::Configuration(msg) => {
                CoreError::Validation(msg)
            }
            StorageError::Io(e) => CoreError::Internal(e.to_string()),
            StorageError::Service(msg) => CoreError::Internal(msg),
        }
    }
}
