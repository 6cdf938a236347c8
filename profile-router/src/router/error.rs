//! Router error types.

use crate::bits::BitsError;
use crate::domain::{DomainError, StationId, TimeError};
use crate::pareto::FrontError;
use crate::timetable::TimetableError;

/// Errors from computing profiles and extracting journeys.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Station id outside the timetable
    #[error("station {station} out of range ({count} stations)")]
    StationOutOfRange { station: StationId, count: usize },

    #[error("invalid router configuration: {0}")]
    InvalidConfig(String),

    /// A backpointer leads somewhere the profile has no matching tuple
    #[error("inconsistent profile: {0}")]
    InconsistentProfile(String),

    /// The background computation did not complete
    #[error("profile computation failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Timetable(#[from] TimetableError),

    #[error(transparent)]
    Bits(#[from] BitsError),

    #[error(transparent)]
    Front(#[from] FrontError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Time(#[from] TimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouterError::StationOutOfRange {
            station: StationId(7),
            count: 3,
        };
        assert_eq!(err.to_string(), "station 7 out of range (3 stations)");

        let err: RouterError = FrontError::NotFound {
            arrival: 600,
            changes: 1,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "no tuple arriving at minute 600 with 1 changes"
        );

        let err: RouterError = TimetableError::StationOutOfRange(StationId(2)).into();
        assert!(matches!(err, RouterError::Timetable(_)));
    }
}
