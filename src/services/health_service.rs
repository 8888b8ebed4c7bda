use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the datastore and report the overall service health.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.room_store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "datastore health check failed");
            HealthResponse::degraded()
        }
    }
}
