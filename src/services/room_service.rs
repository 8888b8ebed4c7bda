use crate::{dto::room::RoomSummary, error::AppError, state::SharedState};

/// List the rooms of the currently open cohort.
pub async fn list_active(state: &SharedState) -> Result<Vec<RoomSummary>, AppError> {
    let rooms = state.room_store().list_active().await?;
    Ok(rooms.into_iter().map(RoomSummary::from).collect())
}
