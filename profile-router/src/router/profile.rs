//! Finished per-station fronts for one target and date.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Journey, StationId};
use crate::pareto::ParetoFront;
use crate::timetable::{DayConnections, Timetable};

use super::{RouterError, extract_journeys};

/// The result of a scan: for every station, the Pareto front of
/// (departure, arrival, changes) tuples for reaching the target from it.
///
/// Station-front payloads are [`Backpointer`](super::Backpointer)s into
/// [`connections`](Self::connections). A profile is immutable and can be
/// shared between threads.
pub struct Profile<T> {
    timetable: Arc<T>,
    connections: Arc<DayConnections>,
    target: StationId,
    fronts: Vec<ParetoFront>,
}

impl<T: Timetable> Profile<T> {
    pub(super) fn new(
        timetable: Arc<T>,
        connections: Arc<DayConnections>,
        target: StationId,
        fronts: Vec<ParetoFront>,
    ) -> Self {
        Self {
            timetable,
            connections,
            target,
            fronts,
        }
    }

    /// Returns the date the profile was computed for.
    pub fn date(&self) -> NaiveDate {
        self.connections.date()
    }

    /// Returns the target station.
    pub fn target(&self) -> StationId {
        self.target
    }

    pub fn timetable(&self) -> &T {
        &self.timetable
    }

    /// Returns the connections the payloads point into.
    pub fn connections(&self) -> &DayConnections {
        &self.connections
    }

    /// Returns the number of stations.
    pub fn station_count(&self) -> usize {
        self.fronts.len()
    }

    /// Returns the front of `station`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::StationOutOfRange`] for an unknown station.
    pub fn for_station(&self, station: StationId) -> Result<&ParetoFront, RouterError> {
        self.fronts
            .get(station.index())
            .ok_or(RouterError::StationOutOfRange {
                station,
                count: self.fronts.len(),
            })
    }

    /// Returns every station with its front.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &ParetoFront)> {
        self.fronts
            .iter()
            .enumerate()
            .map(|(i, front)| (StationId(i), front))
    }

    /// Returns the total number of tuples over all stations.
    pub fn tuple_count(&self) -> usize {
        self.fronts.iter().map(ParetoFront::len).sum()
    }

    /// Shorthand for [`extract_journeys`].
    pub fn journeys(&self, station: StationId) -> Result<Vec<Journey>, RouterError> {
        extract_journeys(self, station)
    }
}

impl<T> fmt::Debug for Profile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("date", &self.connections.date())
            .field("target", &self.target)
            .field("stations", &self.fronts.len())
            .finish_non_exhaustive()
    }
}
