//! Timetable records.

use crate::domain::{RouteId, StationId, Vehicle};

/// A station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
}

/// A platform, a boarding point inside a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    pub station: StationId,
}

/// A line that trips run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Display name, e.g. "S3"
    pub name: String,
    pub vehicle: Vehicle,
}

/// One run of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub route: RouteId,
    /// Destination shown on the vehicle
    pub destination: String,
}

/// A walk from one station to another.
///
/// A record whose ends are the same station gives the minimum time needed to
/// change vehicles there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: StationId,
    pub to: StationId,
    pub minutes: u16,
}
