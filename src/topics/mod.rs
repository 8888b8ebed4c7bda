//! Topic sourcing strategies feeding the daily room rotation.

/// Generative strategy backed by a hosted text-generation model.
pub mod generative;
/// Fixed-pool strategy backed by a curated catalog.
pub mod pool;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Number of debate rooms opened by every rotation run.
pub const TOPICS_PER_ROTATION: usize = 6;

/// Result alias for topic sourcing operations.
pub type TopicResult<T> = Result<T, TopicError>;

/// A debate topic proposal ready to become a room.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct TopicCandidate {
    /// Short label shown on the room card (kept under ~25 characters by convention).
    #[validate(length(min = 1))]
    pub title: String,
    /// The debate question itself.
    #[validate(length(min = 1))]
    pub topic: String,
    /// One-to-two sentence framing of the debate.
    #[validate(length(min = 1))]
    pub description: String,
}

/// Abstraction over the strategies able to propose a cohort of topics.
pub trait TopicSource: Send + Sync {
    /// Produce exactly six candidates for the next rotation run.
    ///
    /// Implementations perform no retries; a failed call fails the whole
    /// rotation and the external scheduler re-invokes later.
    fn next_six(&self) -> BoxFuture<'static, TopicResult<[TopicCandidate; TOPICS_PER_ROTATION]>>;
}

/// Failures raised while sourcing topics.
#[derive(Debug, Error)]
pub enum TopicError {
    /// The generation service could not be reached, timed out, or answered
    /// with a non-success status.
    #[error("topic provider unavailable: {reason}")]
    UpstreamUnavailable {
        /// Human-readable cause (status code, transport error, timeout).
        reason: String,
    },
    /// The generated payload is not valid JSON.
    #[error("topic provider returned malformed JSON")]
    MalformedResponse {
        /// Parse failure reported by the JSON decoder.
        #[source]
        source: serde_json::Error,
    },
    /// The payload parsed but is not an array of exactly six entries.
    #[error("expected a JSON array of exactly 6 topics, got {got}")]
    WrongShape {
        /// Shape actually observed ("an object", "an array of 5", ...).
        got: String,
    },
    /// A topic entry lacks one of its required fields.
    #[error("topic at index {index} is missing a non-empty `{field}` field")]
    IncompleteTopic {
        /// Position of the offending entry in the generated array.
        index: usize,
        /// Name of the missing or empty field.
        field: &'static str,
    },
}
