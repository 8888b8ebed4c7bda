use std::time::SystemTime;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::{dao::storage::StorageError, dto::format_system_time, topics::TopicError};

/// Failures of one rotation run, surfaced to the invoking scheduler.
#[derive(Debug, Error)]
pub enum RotationError {
    /// A required credential is absent; nothing was attempted.
    #[error("`{0}` is not configured")]
    Configuration(&'static str),
    /// The topic source failed; no datastore write was issued.
    #[error(transparent)]
    Topic(#[from] TopicError),
    /// The bulk deactivation of the previous cohort failed; no rooms were created.
    #[error("failed to deactivate the current room cohort: {source}")]
    DeactivationFailed {
        /// Datastore failure behind the aborted update.
        #[source]
        source: StorageError,
    },
    /// Inserting the new cohort failed after deactivation went through. No
    /// rooms stay active until the next successful run.
    #[error("failed to create the replacement room cohort: {source}")]
    CreationFailed {
        /// Datastore failure behind the aborted insert.
        #[source]
        source: StorageError,
    },
    /// Another rotation run currently holds the gate.
    #[error("a rotation is already in progress")]
    AlreadyRunning,
}

/// Failure body answered by the rotation endpoints.
#[derive(Serialize)]
struct RotationFailureBody {
    success: bool,
    error: String,
    timestamp: String,
}

impl IntoResponse for RotationError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            RotationError::AlreadyRunning => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(RotationFailureBody {
            success: false,
            error: self.to_string(),
            timestamp: format_system_time(SystemTime::now()),
        });

        (status, payload).into_response()
    }
}

/// Application-level errors for the plain REST routes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Datastore unavailable or misbehaving.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::ServiceUnavailable(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
