use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dao::models::DebateRoomEntity, dto::format_system_time,
    services::rotation_service::RotationOutcome,
};

/// Title/question pair echoed back to the scheduler after a rotation.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct TopicSummary {
    /// Short label of the created room.
    pub title: String,
    /// The debate question opened by the room.
    pub topic: String,
}

impl From<&DebateRoomEntity> for TopicSummary {
    fn from(room: &DebateRoomEntity) -> Self {
        Self {
            title: room.title.clone(),
            topic: room.topic.clone(),
        }
    }
}

/// Body answered by the rotation endpoints on success.
#[derive(Debug, Serialize, ToSchema)]
pub struct RotationResponse {
    /// Always `true`; failures answer with the error body instead.
    pub success: bool,
    /// Human-readable summary of the run.
    pub message: String,
    /// The cohort that just went live.
    pub topics: Vec<TopicSummary>,
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
}

impl RotationResponse {
    /// Assemble the success body from a finished rotation run.
    pub fn from_outcome(message: impl Into<String>, outcome: &RotationOutcome) -> Self {
        Self {
            success: true,
            message: message.into(),
            topics: outcome.rooms.iter().map(TopicSummary::from).collect(),
            generated_at: format_system_time(outcome.rotated_at),
        }
    }
}
