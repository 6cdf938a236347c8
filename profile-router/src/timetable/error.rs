//! Timetable error types.

use crate::bits::BitsError;
use crate::domain::{ConnectionId, RouteId, StationId, StopId, TripId};

/// Errors from loading or querying a timetable.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    #[error("station {0} out of range")]
    StationOutOfRange(StationId),

    #[error("stop {0} out of range")]
    StopOutOfRange(StopId),

    #[error("trip {0} out of range")]
    TripOutOfRange(TripId),

    #[error("route {0} out of range")]
    RouteOutOfRange(RouteId),

    #[error("connection {0} out of range")]
    ConnectionOutOfRange(ConnectionId),

    #[error("transfer record {0} out of range")]
    TransferOutOfRange(usize),

    /// No transfer connects the pair; the normal "no such option" case
    #[error("no transfer from station {from} to station {to}")]
    TransferNotFound { from: StationId, to: StationId },

    #[error("failed to read timetable: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse timetable: {0}")]
    Json(#[from] serde_json::Error),

    /// The data parsed but is inconsistent
    #[error("invalid timetable: {0}")]
    Invalid(String),

    #[error(transparent)]
    Bits(#[from] BitsError),
}

impl TimetableError {
    /// Returns true for the recoverable "no transfer between these stations" case.
    pub fn is_transfer_not_found(&self) -> bool {
        matches!(self, TimetableError::TransferNotFound { .. })
    }
}
