use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// The datastore answered the probe; rotations can run.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// The datastore could not be reached; a rotation would fail right now.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
