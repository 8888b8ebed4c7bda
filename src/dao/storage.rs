use std::error::Error;
use thiserror::Error;

/// Result alias for room storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the room store regardless of the backing datastore.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The datastore rejected the operation or could not be reached.
    #[error("datastore unavailable: {message}")]
    Unavailable {
        /// Short description of the failed operation.
        message: String,
        /// Backend-specific failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wrap a backend failure into the backend-agnostic error.
    pub fn unavailable(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Unavailable {
            message: message.into(),
            source: Box::new(source),
        }
    }
}
