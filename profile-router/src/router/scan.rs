//! Profile connection scan.
//!
//! Connections are swept in non-increasing departure order. When a connection
//! is reached, every front it reads from (its trip's, and its arrival
//! station's) already holds all the later connections that can follow it, so
//! one pass settles every station. Rides taking no time at the same minute
//! are the exception and are swept until they settle.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::bits::PackedCriterion;
use crate::domain::{ConnectionId, StationId};
use crate::pareto::FrontBuilder;
use crate::timetable::{Connection, DayConnections, Timetable, TimetableError};

use super::{Backpointer, Profile, RouterConfig, RouterError};

/// Computes profiles over a timetable.
pub struct Router<T> {
    timetable: Arc<T>,
    config: RouterConfig,
}

impl<T: Timetable> Router<T> {
    /// Create a router.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfig`] if the configuration exceeds
    /// what the criterion codec can store.
    pub fn new(timetable: Arc<T>, config: RouterConfig) -> Result<Self, RouterError> {
        config.validate()?;
        Ok(Self { timetable, config })
    }

    pub fn timetable(&self) -> &Arc<T> {
        &self.timetable
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Compute every station's front for reaching `target` on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::StationOutOfRange`] for an unknown target, and
    /// timetable or codec errors if the data is inconsistent.
    pub fn compute_profile(
        &self,
        date: NaiveDate,
        target: StationId,
    ) -> Result<Profile<T>, RouterError> {
        let station_count = self.timetable.station_count();
        if target.index() >= station_count {
            return Err(RouterError::StationOutOfRange {
                station: target,
                count: station_count,
            });
        }

        let connections = self.timetable.connections_for(date)?;
        debug!(
            %date,
            target = %target,
            connections = connections.len(),
            "Starting profile scan"
        );

        let mut scan = Scan::new(self.timetable.as_ref(), &connections, target, &self.config)?;
        let order: Vec<_> = connections.iter().collect();
        for group in order.chunk_by(|(_, a), (_, b)| {
            a.departure == b.departure && a.departure == a.arrival && b.departure == b.arrival
        }) {
            scan.visit_group(group)?;
        }

        let fronts = scan.station_fronts.iter().map(FrontBuilder::build).collect();
        let profile = Profile::new(Arc::clone(&self.timetable), connections, target, fronts);

        debug!(
            %date,
            target = %target,
            tuples = profile.tuple_count(),
            "Finished profile scan"
        );
        Ok(profile)
    }
}

/// Working state of one sweep.
struct Scan<'a, T> {
    timetable: &'a T,
    connections: &'a DayConnections,
    max_changes: u32,
    /// Walking minutes from each station to the target, if any
    walk_to_target: Vec<Option<u16>>,
    /// For each station, the stations one can start from to board there, with
    /// the walk needed
    boarding: Vec<Vec<(StationId, u16)>>,
    station_fronts: Vec<FrontBuilder>,
    trip_fronts: Vec<FrontBuilder>,
    working: FrontBuilder,
}

impl<'a, T: Timetable> Scan<'a, T> {
    fn new(
        timetable: &'a T,
        connections: &'a DayConnections,
        target: StationId,
        config: &RouterConfig,
    ) -> Result<Self, RouterError> {
        let station_count = timetable.station_count();
        let transfers = timetable.transfers();

        let mut walk_to_target = vec![None; station_count];
        for transfer in transfers.arriving(target)? {
            walk_to_target[transfer.from.index()] = Some(transfer.minutes);
        }
        // Arriving at the target ends the journey, whatever its change time.
        walk_to_target[target.index()] = Some(0);

        let mut boarding = Vec::with_capacity(station_count);
        for station in (0..station_count).map(StationId) {
            let walks = transfers.arriving(station)?;
            let mut options: Vec<_> = walks.iter().map(|t| (t.from, t.minutes)).collect();
            if !walks.iter().any(|t| t.from == station) {
                options.push((station, 0));
            }
            boarding.push(options);
        }

        Ok(Self {
            timetable,
            connections,
            max_changes: config.max_changes,
            walk_to_target,
            boarding,
            station_fronts: vec![FrontBuilder::new(); station_count],
            trip_fronts: vec![FrontBuilder::new(); timetable.trip_count()],
            working: FrontBuilder::new(),
        })
    }

    /// Visit connections that share a departure minute and take no time.
    ///
    /// Such rides can feed each other in any order, so the group is swept
    /// again from the same trip fronts until no station front changes. Other
    /// connections come one at a time.
    fn visit_group(&mut self, group: &[(ConnectionId, &Connection)]) -> Result<(), RouterError> {
        let snapshot: Vec<(usize, FrontBuilder)> = if group.len() > 1 {
            let mut trips: Vec<usize> = group.iter().map(|(_, c)| c.trip.index()).collect();
            trips.sort_unstable();
            trips.dedup();
            trips
                .into_iter()
                .filter_map(|trip| Some((trip, self.trip_fronts.get(trip)?.clone())))
                .collect()
        } else {
            Vec::new()
        };

        let mut passes = 0;
        loop {
            let mut changed = false;
            for &(id, connection) in group {
                changed |= self.visit(id, connection)?;
            }
            passes += 1;
            if group.len() == 1 || !changed {
                break;
            }
            for (trip, front) in &snapshot {
                self.trip_fronts[*trip] = front.clone();
            }
        }

        if passes > 2 {
            trace!(
                connections = group.len(),
                passes,
                "Settled same-minute rides"
            );
        }
        Ok(())
    }

    /// Returns whether any station front changed.
    fn visit(&mut self, id: ConnectionId, connection: &Connection) -> Result<bool, RouterError> {
        let departure_station = self.timetable.station_of(connection.departure_stop)?;
        let arrival_station = self.timetable.station_of(connection.arrival_stop)?;
        let trip = connection.trip.index();
        if trip >= self.trip_fronts.len() {
            return Err(TimetableError::TripOutOfRange(connection.trip).into());
        }

        let alight = Backpointer::alight(id).encode()?;
        self.working.clear();

        // Get off here and walk to the target.
        if let Some(walk) = self.walk_to_target[arrival_station.index()] {
            let arrival = connection.arrival + i32::from(walk);
            if PackedCriterion::minutes_in_range(arrival) {
                self.working.add(PackedCriterion::pack(arrival, 0, alight)?);
            } else {
                trace!(
                    connection = %id,
                    station = %arrival_station,
                    arrival,
                    "Skipping arrival outside the representable day"
                );
            }
        }

        // Stay on board.
        self.working.merge(&self.trip_fronts[trip]);

        // Get off here and continue with another vehicle.
        for tuple in self.station_fronts[arrival_station.index()].iter() {
            if tuple.departure()? < connection.arrival {
                // Fronts list later departures first.
                break;
            }
            let changes = tuple.changes() + 1;
            if changes <= self.max_changes {
                self.working
                    .add(PackedCriterion::pack(tuple.arrival(), changes, alight)?);
            }
        }

        if self.working.is_empty() {
            return Ok(false);
        }

        self.trip_fronts[trip].merge(&self.working);

        // Boarding here rides from this connection to each tuple's alighting
        // connection.
        let mut boarded = Vec::with_capacity(self.working.len());
        for &tuple in &self.working {
            let end = Backpointer::decode(tuple.payload()).connection;
            let hops = self
                .connections
                .get(end)?
                .trip_position
                .checked_sub(connection.trip_position)
                .and_then(|hops| u32::try_from(hops).ok())
                .ok_or_else(|| {
                    RouterError::InconsistentProfile(format!(
                        "connection {end} does not follow connection {id} in its trip"
                    ))
                })?;
            boarded.push(tuple.with_payload(Backpointer::board(id, hops).encode()?));
        }
        let boarded: FrontBuilder = boarded.into_iter().collect();

        let mut changed = false;

        for &(origin, walk) in &self.boarding[departure_station.index()] {
            let departure = connection.departure - i32::from(walk);
            if !PackedCriterion::minutes_in_range(departure) {
                trace!(
                    connection = %id,
                    station = %origin,
                    departure,
                    "Skipping departure outside the representable day"
                );
                continue;
            }

            let front = &mut self.station_fronts[origin.index()];
            if front.fully_dominates(&boarded, departure)? {
                continue;
            }
            for &tuple in &boarded {
                changed |= front.insert(tuple.with_departure(departure)?);
            }
        }

        Ok(changed)
    }
}
