use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::dao::models::{DebateRoomEntity, NewDebateRoom};

/// Name of the collection holding debate rooms.
pub const ROOMS_TABLE: &str = "debate_rooms";

/// Wire representation of a stored debate room row.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomRow {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub description: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl RoomRow {
    /// Convert the wire row into the backend-agnostic entity.
    pub fn into_entity(self) -> DebateRoomEntity {
        DebateRoomEntity {
            id: self.id,
            title: self.title,
            topic: self.topic,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at.into(),
            expires_at: self.expires_at.into(),
        }
    }
}

/// Insert payload sent to the datastore; the id column is left to the server.
#[derive(Debug, Serialize)]
pub struct NewRoomRow {
    pub title: String,
    pub topic: String,
    pub description: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl NewRoomRow {
    /// Convert the backend-agnostic insert payload into its wire form.
    pub fn from_entity(room: NewDebateRoom) -> Self {
        Self {
            title: room.title,
            topic: room.topic,
            description: room.description,
            is_active: room.is_active,
            created_at: room.created_at.into(),
            expires_at: room.expires_at.into(),
        }
    }
}
