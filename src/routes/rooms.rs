use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::room::RoomSummary, error::AppError, services::room_service, state::SharedState};

/// Configure the room listing subtree.
pub fn router() -> Router<SharedState> {
    Router::new().route("/debate-rooms", get(list_active_rooms))
}

/// Return the currently open cohort of debate rooms.
#[utoipa::path(
    get,
    path = "/debate-rooms",
    tag = "rooms",
    responses((status = 200, description = "Currently active rooms", body = [RoomSummary]))
)]
pub async fn list_active_rooms(
    State(state): State<SharedState>,
) -> Result<Json<Vec<RoomSummary>>, AppError> {
    let rooms = room_service::list_active(&state).await?;
    Ok(Json(rooms))
}
