use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// A debate room as persisted in the `debate_rooms` collection.
///
/// Rooms are only ever created by a rotation run and only ever mutated by a
/// later run flipping `is_active` off. Old cohorts stay around as an archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebateRoomEntity {
    /// Primary key, assigned by the datastore.
    pub id: Uuid,
    /// Short label shown on the room card.
    pub title: String,
    /// The debate question members argue about.
    pub topic: String,
    /// Context sentence(s) framing the debate.
    pub description: String,
    /// Whether the room belongs to the currently open cohort.
    pub is_active: bool,
    /// Cohort creation timestamp, shared by the six rooms of one run.
    pub created_at: SystemTime,
    /// Moment the room closes, 24 hours after creation.
    pub expires_at: SystemTime,
}

/// Insert payload for a debate room; the datastore assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDebateRoom {
    /// Short label shown on the room card.
    pub title: String,
    /// The debate question members argue about.
    pub topic: String,
    /// Context sentence(s) framing the debate.
    pub description: String,
    /// Whether the room opens as part of the active cohort.
    pub is_active: bool,
    /// Cohort creation timestamp.
    pub created_at: SystemTime,
    /// Moment the room closes.
    pub expires_at: SystemTime,
}
