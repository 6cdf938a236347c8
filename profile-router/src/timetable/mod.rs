//! Read-only timetable access.
//!
//! The router only queries a timetable through the [`Timetable`] trait, which
//! exposes stations, stops, trips, routes, walking transfers and the ordered
//! connections of a date. [`MemoryTimetable`] is the JSON-backed
//! implementation used by the binary and the tests.

mod connections;
mod error;
mod memory;
mod model;
pub mod raw;
mod transfers;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{RouteId, StationId, Stop, StopId, TripId};

pub use connections::{Connection, DayConnections};
pub use error::TimetableError;
pub use memory::MemoryTimetable;
pub use model::{Platform, Route, Station, Transfer, Trip};
pub use transfers::{Transfers, TransfersBuilder};

/// Random-access view of a loaded timetable.
///
/// Stop ids below [`station_count`](Timetable::station_count) name stations
/// themselves; higher ids name platforms.
pub trait Timetable {
    /// Returns the number of stations.
    fn station_count(&self) -> usize;

    /// Returns the number of trips.
    fn trip_count(&self) -> usize;

    fn station_name(&self, station: StationId) -> Result<&str, TimetableError>;

    /// Returns the station a stop belongs to.
    fn station_of(&self, stop: StopId) -> Result<StationId, TimetableError>;

    /// Returns the platform name, or `None` for a station stop.
    fn platform_name(&self, stop: StopId) -> Result<Option<&str>, TimetableError>;

    fn trip(&self, trip: TripId) -> Result<&Trip, TimetableError>;

    fn route(&self, route: RouteId) -> Result<&Route, TimetableError>;

    /// Returns the walking transfers between stations.
    fn transfers(&self) -> &Transfers;

    /// Returns every connection running on `date`, in scan order.
    fn connections_for(&self, date: NaiveDate) -> Result<Arc<DayConnections>, TimetableError>;

    /// Resolve a stop's display names.
    fn stop(&self, stop: StopId) -> Result<Stop, TimetableError> {
        let station = self.station_of(stop)?;
        Ok(Stop {
            id: stop,
            station,
            name: self.station_name(station)?.to_owned(),
            platform: self.platform_name(stop)?.map(str::to_owned),
        })
    }
}
