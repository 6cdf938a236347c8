//! Journey extraction.
//!
//! Each tuple of a station's front becomes one journey by following payload
//! backpointers: ride the pointed-at connections, then look up the tuple
//! with one change fewer at the station alighted at, until no changes are
//! left.

use crate::bits::PackedCriterion;
use crate::domain::{
    Foot, IntermediateStop, Journey, Leg, RailTime, StationId, StopId, TimeError, Transport,
};
use crate::timetable::{Connection, Timetable};

use super::{Backpointer, Profile, RouterError};

/// Build every Pareto-optimal journey from `station` to the profile's target.
///
/// Journeys are ordered by departure, then arrival. A station with an empty
/// front yields an empty list.
///
/// # Errors
///
/// Returns [`RouterError::StationOutOfRange`] for an unknown station and
/// [`RouterError::InconsistentProfile`] if a backpointer cannot be followed.
pub fn extract_journeys<T: Timetable>(
    profile: &Profile<T>,
    station: StationId,
) -> Result<Vec<Journey>, RouterError> {
    let front = profile.for_station(station)?;
    let extractor = Extractor {
        profile,
        timetable: profile.timetable(),
    };

    let mut journeys = front
        .iter()
        .map(|&tuple| extractor.journey(station, tuple))
        .collect::<Result<Vec<_>, _>>()?;

    journeys.sort_by(|a, b| {
        a.departure_time()
            .cmp(&b.departure_time())
            .then(a.arrival_time().cmp(&b.arrival_time()))
    });
    Ok(journeys)
}

struct Extractor<'a, T> {
    profile: &'a Profile<T>,
    timetable: &'a T,
}

/// Where the rider stands after getting off.
struct Alighted {
    stop: StopId,
    station: StationId,
    time: i32,
}

impl<T: Timetable> Extractor<'_, T> {
    fn journey(&self, origin: StationId, tuple: PackedCriterion) -> Result<Journey, RouterError> {
        let mut legs = Vec::new();
        let mut tuple = tuple;
        let mut alighted: Option<Alighted> = None;

        loop {
            let pointer = Backpointer::decode(tuple.payload());
            let ride = self
                .profile
                .connections()
                .ride(pointer.connection, pointer.hops as usize)?;
            let (&board, rest) = ride.split_first().ok_or_else(|| {
                RouterError::InconsistentProfile(format!("empty ride at {:?}", pointer))
            })?;
            let alight = rest.last().copied().unwrap_or(board);
            let board_station = self.timetable.station_of(board.departure_stop)?;

            match &alighted {
                None => {
                    let walk = self.walk_minutes(origin, board_station)?;
                    if origin != board_station || walk > 0 {
                        legs.push(self.foot(
                            StopId::from(origin),
                            board.departure - walk,
                            board.departure_stop,
                            board.departure,
                        )?);
                    }
                }
                Some(at) => {
                    let walk = self.walk_minutes(at.station, board_station)?;
                    legs.push(self.foot(at.stop, at.time, board.departure_stop, at.time + walk)?);
                }
            }

            legs.push(Leg::Transport(self.transport(&ride)?));

            let alight_station = self.timetable.station_of(alight.arrival_stop)?;
            if tuple.changes() == 0 {
                let target = self.profile.target();
                if alight_station != target {
                    let walk = self.walk_minutes(alight_station, target)?;
                    legs.push(self.foot(
                        alight.arrival_stop,
                        alight.arrival,
                        StopId::from(target),
                        alight.arrival + walk,
                    )?);
                }
                break;
            }

            tuple = self.continuation(alight_station, alight.arrival, tuple)?;
            alighted = Some(Alighted {
                stop: alight.arrival_stop,
                station: alight_station,
                time: alight.arrival,
            });
        }

        Ok(Journey::new(legs)?)
    }

    /// Find the tuple a rider getting off at `station` at minute `arrived`
    /// continues with.
    fn continuation(
        &self,
        station: StationId,
        arrived: i32,
        tuple: PackedCriterion,
    ) -> Result<PackedCriterion, RouterError> {
        let changes = tuple.changes() - 1;
        let front = self.profile.for_station(station)?;
        let departs_in_time = |c: &PackedCriterion| c.departure().is_ok_and(|d| d >= arrived);

        if let Ok(next) = front.get(tuple.arrival(), changes) {
            if departs_in_time(&next) {
                return Ok(next);
            }
        }

        // The exact tuple may have been replaced by one departing at the same
        // minute that is at least as good.
        front
            .iter()
            .copied()
            .find(|c| {
                departs_in_time(c) && c.arrival() <= tuple.arrival() && c.changes() <= changes
            })
            .ok_or_else(|| {
                RouterError::InconsistentProfile(format!(
                    "station {} has no tuple arriving by minute {} with {} changes after minute {}",
                    station,
                    tuple.arrival(),
                    changes,
                    arrived
                ))
            })
    }

    fn transport(&self, ride: &[&Connection]) -> Result<Transport, RouterError> {
        let (&board, rest) = ride
            .split_first()
            .ok_or_else(|| RouterError::InconsistentProfile("empty ride".into()))?;
        let alight = rest.last().copied().unwrap_or(board);

        let trip = self.timetable.trip(board.trip)?;
        let route = self.timetable.route(trip.route)?;

        let intermediate_stops = ride
            .windows(2)
            .map(|pair| -> Result<IntermediateStop, RouterError> {
                Ok(IntermediateStop {
                    stop: self.timetable.stop(pair[0].arrival_stop)?,
                    arrival: self.time(pair[0].arrival)?,
                    departure: self.time(pair[1].departure)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Transport {
            from: self.timetable.stop(board.departure_stop)?,
            departure: self.time(board.departure)?,
            to: self.timetable.stop(alight.arrival_stop)?,
            arrival: self.time(alight.arrival)?,
            intermediate_stops,
            vehicle: route.vehicle,
            route: route.name.clone(),
            destination: trip.destination.clone(),
        })
    }

    fn foot(&self, from: StopId, departure: i32, to: StopId, arrival: i32) -> Result<Leg, RouterError> {
        Ok(Leg::Foot(Foot {
            from: self.timetable.stop(from)?,
            departure: self.time(departure)?,
            to: self.timetable.stop(to)?,
            arrival: self.time(arrival)?,
        }))
    }

    /// Walking minutes between stations; a station reaches itself in no time
    /// unless the transfer table says otherwise.
    fn walk_minutes(&self, from: StationId, to: StationId) -> Result<i32, RouterError> {
        match self.timetable.transfers().minutes_between(from, to) {
            Ok(minutes) => Ok(i32::from(minutes)),
            Err(e) if e.is_transfer_not_found() && from == to => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn time(&self, minutes: i32) -> Result<RailTime, TimeError> {
        RailTime::from_day_minutes(self.profile.date(), minutes)
    }
}
