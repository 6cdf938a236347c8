//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from timetable loading and routing errors.

use super::StopId;

/// Domain-level errors for journey validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A single leg is malformed (e.g., arrives before it departs)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,

    /// Two rides or two walks follow each other
    #[error("journey legs must alternate between rides and walks")]
    LegsNotAlternating,

    /// A leg does not start where the previous one ended
    #[error("stops {0} and {1} are not connected")]
    StopsNotConnected(StopId, StopId),

    /// A leg starts before the previous one ends
    #[error("journey legs overlap in time")]
    LegsOverlap,
}
