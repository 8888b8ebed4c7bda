use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dao::models::DebateRoomEntity, dto::format_system_time};

/// Snapshot of an open debate room for read-only listings.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct RoomSummary {
    /// Stable identifier of the room.
    pub id: Uuid,
    /// Short label shown on the room card.
    pub title: String,
    /// The debate question.
    pub topic: String,
    /// Context framing the debate.
    pub description: String,
    /// RFC 3339 creation timestamp of the cohort.
    pub created_at: String,
    /// RFC 3339 closing time of the room.
    pub expires_at: String,
}

impl From<DebateRoomEntity> for RoomSummary {
    fn from(room: DebateRoomEntity) -> Self {
        Self {
            id: room.id,
            title: room.title,
            topic: room.topic,
            description: room.description,
            created_at: format_system_time(room.created_at),
            expires_at: format_system_time(room.expires_at),
        }
    }
}
