//! Error types shared by the PostgREST storage implementation.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`RestDaoError`] failures.
pub type RestResult<T> = Result<T, RestDaoError>;

/// Failures that can occur while talking to the hosted datastore.
#[derive(Debug, Error)]
pub enum RestDaoError {
    /// Required environment variable is missing.
    #[error("missing datastore environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the absent variable.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build datastore client")]
    ClientBuilder {
        /// Builder failure reported by the HTTP stack.
        #[source]
        source: reqwest::Error,
    },
    /// A request to the collection endpoint could not be sent.
    #[error("failed to send datastore request to `{path}`")]
    RequestSend {
        /// Collection path the request targeted.
        path: String,
        /// Transport failure reported by the HTTP stack.
        #[source]
        source: reqwest::Error,
    },
    /// The datastore answered with an unexpected status code.
    #[error("unexpected datastore response status {status} for `{path}`")]
    RequestStatus {
        /// Collection path the request targeted.
        path: String,
        /// Status code returned by the datastore.
        status: StatusCode,
    },
    /// Response payload could not be parsed into the expected rows.
    #[error("failed to decode datastore response for `{path}`")]
    DecodeResponse {
        /// Collection path the request targeted.
        path: String,
        /// Decode failure reported by the HTTP stack.
        #[source]
        source: reqwest::Error,
    },
}

impl From<RestDaoError> for StorageError {
    fn from(err: RestDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
