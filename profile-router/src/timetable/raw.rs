//! Timetable file DTOs.
//!
//! These types map directly to the JSON timetable document. References
//! between records are plain table indices and times are service-day
//! "HH:MM" strings; both are checked when the document is turned into a
//! [`MemoryTimetable`](super::MemoryTimetable).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Vehicle;

/// A whole timetable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimetable {
    pub stations: Vec<RawStation>,

    /// Platforms get stop ids after the stations, in order.
    #[serde(default)]
    pub platforms: Vec<RawPlatform>,

    pub routes: Vec<RawRoute>,

    pub trips: Vec<RawTrip>,

    #[serde(default)]
    pub transfers: Vec<RawTransfer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStation {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlatform {
    pub name: String,
    /// Index into `stations`
    pub station: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoute {
    pub name: String,
    pub vehicle: Vehicle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrip {
    /// Index into `routes`
    pub route: usize,

    pub destination: String,

    /// Dates the trip runs on. Absent means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<NaiveDate>>,

    /// Calls in order; at least two.
    pub stops: Vec<RawCall>,
}

/// A trip calling at a stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCall {
    /// Stop id: a station index, or the station count plus a platform index
    pub stop: usize,

    /// Arrival, "HH:MM" with hours up to 47. Defaults to the departure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,

    /// Departure, "HH:MM" with hours up to 47. Defaults to the arrival.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransfer {
    pub from: usize,
    pub to: usize,
    pub minutes: u16,

    /// Also add the reverse walk with the same duration
    #[serde(default)]
    pub both_ways: bool,
}
