//! In-memory timetable loaded from JSON.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{RouteId, StationId, StopId, TripId, parse_day_minutes};

use super::raw::{RawCall, RawTimetable};
use super::{
    Connection, DayConnections, Platform, Route, Station, Timetable, TimetableError, Transfers,
    TransfersBuilder, Trip,
};

/// When and where a trip runs.
#[derive(Debug, Clone)]
struct Schedule {
    /// `None` runs every day
    dates: Option<BTreeSet<NaiveDate>>,
    hops: Vec<Hop>,
}

impl Schedule {
    fn runs_on(&self, date: NaiveDate) -> bool {
        self.dates.as_ref().is_none_or(|dates| dates.contains(&date))
    }
}

#[derive(Debug, Clone, Copy)]
struct Hop {
    from: StopId,
    departure: i32,
    to: StopId,
    arrival: i32,
}

/// A timetable held entirely in memory.
///
/// # Examples
///
/// ```
/// use profile_router::timetable::{MemoryTimetable, Timetable};
///
/// let json = r#"{
///     "stations": [{ "name": "Central" }, { "name": "Harbour" }],
///     "routes": [{ "name": "S1", "vehicle": "train" }],
///     "trips": [{
///         "route": 0,
///         "destination": "Harbour",
///         "stops": [
///             { "stop": 0, "departure": "10:00" },
///             { "stop": 1, "arrival": "10:20" }
///         ]
///     }]
/// }"#;
///
/// let timetable = MemoryTimetable::from_json_str(json).unwrap();
/// assert_eq!(timetable.station_count(), 2);
/// assert_eq!(timetable.station_by_name("Harbour").unwrap().index(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryTimetable {
    stations: Vec<Station>,
    platforms: Vec<Platform>,
    routes: Vec<Route>,
    trips: Vec<Trip>,
    schedules: Vec<Schedule>,
    transfers: Transfers,
}

impl MemoryTimetable {
    /// Load a timetable document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let timetable = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            stations = timetable.stations.len(),
            trips = timetable.trips.len(),
            transfers = timetable.transfers.len(),
            "Loaded timetable"
        );
        Ok(timetable)
    }

    /// Parse a timetable document.
    pub fn from_json_str(json: &str) -> Result<Self, TimetableError> {
        let raw: RawTimetable = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Validate a parsed document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any index points outside its table, a trip has fewer
    /// than two calls, a time is malformed, or a trip's times run backwards.
    pub fn from_raw(raw: RawTimetable) -> Result<Self, TimetableError> {
        let station_count = raw.stations.len();
        let stop_count = station_count + raw.platforms.len();

        let stations = raw
            .stations
            .into_iter()
            .map(|s| Station { name: s.name })
            .collect();

        let platforms = raw
            .platforms
            .into_iter()
            .map(|p| {
                if p.station >= station_count {
                    return Err(TimetableError::StationOutOfRange(StationId(p.station)));
                }
                Ok(Platform {
                    name: p.name,
                    station: StationId(p.station),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let routes: Vec<Route> = raw
            .routes
            .into_iter()
            .map(|r| Route {
                name: r.name,
                vehicle: r.vehicle,
            })
            .collect();

        let mut trips = Vec::with_capacity(raw.trips.len());
        let mut schedules = Vec::with_capacity(raw.trips.len());
        for (index, trip) in raw.trips.into_iter().enumerate() {
            if trip.route >= routes.len() {
                return Err(TimetableError::RouteOutOfRange(RouteId(trip.route)));
            }
            if trip.stops.len() < 2 {
                return Err(TimetableError::Invalid(format!(
                    "trip {index} calls at fewer than two stops"
                )));
            }

            let calls = trip
                .stops
                .iter()
                .enumerate()
                .map(|(position, call)| resolve_call(index, position, call, stop_count))
                .collect::<Result<Vec<_>, _>>()?;

            let mut hops = Vec::with_capacity(calls.len() - 1);
            for pair in calls.windows(2) {
                let (from, _, departure) = pair[0];
                let (to, arrival, _) = pair[1];
                if arrival < departure {
                    return Err(TimetableError::Invalid(format!(
                        "trip {index} arrives at stop {to} before leaving stop {from}"
                    )));
                }
                hops.push(Hop {
                    from,
                    departure,
                    to,
                    arrival,
                });
            }

            trips.push(Trip {
                route: RouteId(trip.route),
                destination: trip.destination,
            });
            schedules.push(Schedule {
                dates: trip.dates.map(|dates| dates.into_iter().collect()),
                hops,
            });
        }

        let transfers = raw
            .transfers
            .into_iter()
            .fold(TransfersBuilder::new(), |builder, t| {
                let (from, to) = (StationId(t.from), StationId(t.to));
                if t.both_ways {
                    builder.add_both_ways(from, to, t.minutes)
                } else {
                    builder.add(from, to, t.minutes)
                }
            })
            .build(station_count)?;

        debug!(
            stations = station_count,
            stops = stop_count,
            trips = trips.len(),
            "Validated timetable"
        );

        Ok(Self {
            stations,
            platforms,
            routes,
            trips,
            schedules,
            transfers,
        })
    }

    /// Find a station by its exact name.
    pub fn station_by_name(&self, name: &str) -> Option<StationId> {
        self.stations
            .iter()
            .position(|s| s.name == name)
            .map(StationId)
    }

    fn platform(&self, stop: StopId) -> Result<Option<&Platform>, TimetableError> {
        match stop.index().checked_sub(self.stations.len()) {
            None => Ok(None),
            Some(index) => self
                .platforms
                .get(index)
                .map(Some)
                .ok_or(TimetableError::StopOutOfRange(stop)),
        }
    }
}

/// Resolve a call to `(stop, arrival, departure)`, each time defaulting to
/// the other.
fn resolve_call(
    trip: usize,
    position: usize,
    call: &RawCall,
    stop_count: usize,
) -> Result<(StopId, i32, i32), TimetableError> {
    if call.stop >= stop_count {
        return Err(TimetableError::StopOutOfRange(StopId(call.stop)));
    }

    let parse = |text: &Option<String>| {
        text.as_deref()
            .map(parse_day_minutes)
            .transpose()
            .map_err(|e| TimetableError::Invalid(format!("trip {trip} call {position}: {e}")))
    };

    let (arrival, departure) = match (parse(&call.arrival)?, parse(&call.departure)?) {
        (Some(arrival), Some(departure)) => (arrival, departure),
        (Some(time), None) | (None, Some(time)) => (time, time),
        (None, None) => {
            return Err(TimetableError::Invalid(format!(
                "trip {trip} call {position} has no time"
            )));
        }
    };

    if departure < arrival {
        return Err(TimetableError::Invalid(format!(
            "trip {trip} call {position} departs before it arrives"
        )));
    }

    Ok((StopId(call.stop), arrival, departure))
}

impl Timetable for MemoryTimetable {
    fn station_count(&self) -> usize {
        self.stations.len()
    }

    fn trip_count(&self) -> usize {
        self.trips.len()
    }

    fn station_name(&self, station: StationId) -> Result<&str, TimetableError> {
        self.stations
            .get(station.index())
            .map(|s| s.name.as_str())
            .ok_or(TimetableError::StationOutOfRange(station))
    }

    fn station_of(&self, stop: StopId) -> Result<StationId, TimetableError> {
        Ok(match self.platform(stop)? {
            Some(platform) => platform.station,
            None => StationId(stop.index()),
        })
    }

    fn platform_name(&self, stop: StopId) -> Result<Option<&str>, TimetableError> {
        Ok(self.platform(stop)?.map(|p| p.name.as_str()))
    }

    fn trip(&self, trip: TripId) -> Result<&Trip, TimetableError> {
        self.trips
            .get(trip.index())
            .ok_or(TimetableError::TripOutOfRange(trip))
    }

    fn route(&self, route: RouteId) -> Result<&Route, TimetableError> {
        self.routes
            .get(route.index())
            .ok_or(TimetableError::RouteOutOfRange(route))
    }

    fn transfers(&self) -> &Transfers {
        &self.transfers
    }

    fn connections_for(&self, date: NaiveDate) -> Result<Arc<DayConnections>, TimetableError> {
        let connections = self
            .schedules
            .iter()
            .enumerate()
            .filter(|(_, schedule)| schedule.runs_on(date))
            .flat_map(|(trip, schedule)| {
                schedule
                    .hops
                    .iter()
                    .enumerate()
                    .map(move |(position, hop)| Connection {
                        departure_stop: hop.from,
                        departure: hop.departure,
                        arrival_stop: hop.to,
                        arrival: hop.arrival,
                        trip: TripId(trip),
                        trip_position: position,
                        next_in_trip: None,
                    })
            })
            .collect();

        Ok(Arc::new(DayConnections::new(date, connections)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> serde_json::Value {
        json!({
            "stations": [{ "name": "Central" }, { "name": "Mill" }, { "name": "Harbour" }],
            "platforms": [{ "name": "Platform 1", "station": 0 }],
            "routes": [{ "name": "S1", "vehicle": "train" }, { "name": "7", "vehicle": "bus" }],
            "trips": [
                {
                    "route": 0,
                    "destination": "Harbour",
                    "stops": [
                        { "stop": 3, "departure": "10:00" },
                        { "stop": 1, "arrival": "10:10", "departure": "10:12" },
                        { "stop": 2, "arrival": "10:30" }
                    ]
                },
                {
                    "route": 1,
                    "destination": "Mill",
                    "dates": ["2024-03-16"],
                    "stops": [
                        { "stop": 0, "departure": "23:50" },
                        { "stop": 1, "arrival": "24:20" }
                    ]
                }
            ],
            "transfers": [{ "from": 1, "to": 2, "minutes": 12, "both_ways": true }]
        })
    }

    fn load(value: serde_json::Value) -> Result<MemoryTimetable, TimetableError> {
        MemoryTimetable::from_json_str(&value.to_string())
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn loads_sample() {
        let tt = load(sample()).unwrap();
        assert_eq!(tt.station_count(), 3);
        assert_eq!(tt.trip_count(), 2);
        assert_eq!(tt.station_name(StationId(2)).unwrap(), "Harbour");
        assert_eq!(tt.station_by_name("Mill"), Some(StationId(1)));
        assert_eq!(tt.station_by_name("Nowhere"), None);
        assert_eq!(tt.transfers().len(), 2);
    }

    #[test]
    fn stops_resolve_to_stations() {
        let tt = load(sample()).unwrap();
        assert_eq!(tt.station_of(StopId(1)).unwrap(), StationId(1));
        assert_eq!(tt.station_of(StopId(3)).unwrap(), StationId(0));
        assert_eq!(tt.platform_name(StopId(3)).unwrap(), Some("Platform 1"));
        assert_eq!(tt.platform_name(StopId(0)).unwrap(), None);
        assert!(matches!(
            tt.station_of(StopId(4)),
            Err(TimetableError::StopOutOfRange(StopId(4)))
        ));

        let stop = tt.stop(StopId(3)).unwrap();
        assert_eq!(stop.to_string(), "Central (Platform 1)");
        assert_eq!(stop.station, StationId(0));
    }

    #[test]
    fn trips_and_routes() {
        let tt = load(sample()).unwrap();
        let trip = tt.trip(TripId(1)).unwrap();
        assert_eq!(trip.destination, "Mill");
        assert_eq!(tt.route(trip.route).unwrap().name, "7");
        assert!(tt.trip(TripId(2)).is_err());
        assert!(tt.route(RouteId(5)).is_err());
    }

    #[test]
    fn calendar_filters_connections() {
        let tt = load(sample()).unwrap();

        let weekday = tt.connections_for(date(15)).unwrap();
        assert_eq!(weekday.len(), 2);
        assert!(weekday.iter().all(|(_, c)| c.trip == TripId(0)));

        let saturday = tt.connections_for(date(16)).unwrap();
        assert_eq!(saturday.len(), 3);
        assert_eq!(saturday.date(), date(16));

        let (_, late) = saturday.iter().next().unwrap();
        assert_eq!(late.departure, 23 * 60 + 50);
        assert_eq!(late.arrival, 24 * 60 + 20);
    }

    #[test]
    fn dwell_times_split_arrival_and_departure() {
        let tt = load(sample()).unwrap();
        let day = tt.connections_for(date(15)).unwrap();
        let hops: Vec<_> = day
            .iter()
            .rev()
            .map(|(_, c)| (c.departure, c.arrival))
            .collect();
        assert_eq!(hops, vec![(600, 610), (612, 630)]);
    }

    #[test]
    fn rejects_short_trip() {
        let mut value = sample();
        value["trips"][0]["stops"] = json!([{ "stop": 0, "departure": "10:00" }]);
        assert!(matches!(load(value), Err(TimetableError::Invalid(_))));
    }

    #[test]
    fn rejects_backwards_times() {
        let mut value = sample();
        value["trips"][0]["stops"][1]["arrival"] = json!("09:50");
        value["trips"][0]["stops"][1]["departure"] = json!("09:55");
        assert!(matches!(load(value), Err(TimetableError::Invalid(_))));

        let mut value = sample();
        value["trips"][0]["stops"][1]["departure"] = json!("10:05");
        assert!(matches!(load(value), Err(TimetableError::Invalid(_))));
    }

    #[test]
    fn rejects_bad_references() {
        let mut value = sample();
        value["trips"][0]["route"] = json!(9);
        assert!(matches!(
            load(value),
            Err(TimetableError::RouteOutOfRange(RouteId(9)))
        ));

        let mut value = sample();
        value["trips"][0]["stops"][2]["stop"] = json!(4);
        assert!(matches!(
            load(value),
            Err(TimetableError::StopOutOfRange(StopId(4)))
        ));

        let mut value = sample();
        value["platforms"][0]["station"] = json!(3);
        assert!(matches!(
            load(value),
            Err(TimetableError::StationOutOfRange(StationId(3)))
        ));

        let mut value = sample();
        value["transfers"][0]["to"] = json!(7);
        assert!(matches!(
            load(value),
            Err(TimetableError::StationOutOfRange(StationId(7)))
        ));
    }

    #[test]
    fn rejects_bad_time_text() {
        let mut value = sample();
        value["trips"][0]["stops"][0]["departure"] = json!("48:00");
        assert!(matches!(load(value), Err(TimetableError::Invalid(_))));

        let mut value = sample();
        value["trips"][0]["stops"][0] = json!({ "stop": 3 });
        assert!(matches!(load(value), Err(TimetableError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            MemoryTimetable::from_json_str("{ not json"),
            Err(TimetableError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample().to_string().as_bytes()).unwrap();

        let tt = MemoryTimetable::load(file.path()).unwrap();
        assert_eq!(tt.station_count(), 3);

        let missing = MemoryTimetable::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(TimetableError::Io(_))));
    }
}
