use axum::{Json, Router, extract::State, routing::any};
use time::OffsetDateTime;
use tracing::error;

use crate::{
    dto::rotation::RotationResponse, error::RotationError, services::rotation_service,
    state::SharedState,
};

/// Routes triggering a rotation run, one per topic strategy.
///
/// The external scheduler may call these with any method; CORS preflight is
/// answered by the shared CORS layer.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rotate-debate-topics", any(rotate_from_pool))
        .route("/generate-daily-topics", any(rotate_generated))
}

/// Rotate the active cohort using the fixed topic pool.
#[utoipa::path(
    post,
    path = "/rotate-debate-topics",
    tag = "rotation",
    responses(
        (status = 200, description = "New cohort created", body = RotationResponse),
        (status = 500, description = "Rotation failed; nothing was partially applied"),
    )
)]
pub async fn rotate_from_pool(
    State(state): State<SharedState>,
) -> Result<Json<RotationResponse>, RotationError> {
    let outcome = rotation_service::rotate(&state, state.pool_source())
        .await
        .map_err(|err| {
            error!(error = %err, "pool-backed rotation failed");
            err
        })?;

    Ok(Json(RotationResponse::from_outcome(
        format!(
            "Rotated debate topics successfully. Created {} new rooms.",
            outcome.rooms.len()
        ),
        &outcome,
    )))
}

/// Rotate the active cohort using freshly generated topics.
#[utoipa::path(
    post,
    path = "/generate-daily-topics",
    tag = "rotation",
    responses(
        (status = 200, description = "New cohort created", body = RotationResponse),
        (status = 500, description = "Generation or rotation failed; nothing was partially applied"),
    )
)]
pub async fn rotate_generated(
    State(state): State<SharedState>,
) -> Result<Json<RotationResponse>, RotationError> {
    let source = state.generative_source().ok_or_else(|| {
        let err = RotationError::Configuration("GEMINI_API_KEY");
        error!(error = %err, "generative rotation rejected");
        err
    })?;

    let outcome = rotation_service::rotate(&state, source)
        .await
        .map_err(|err| {
            error!(error = %err, "generative rotation failed");
            err
        })?;

    Ok(Json(RotationResponse::from_outcome(
        format!(
            "Generated {} new AI-powered debate topics for {}",
            outcome.rooms.len(),
            OffsetDateTime::now_utc().date()
        ),
        &outcome,
    )))
}
