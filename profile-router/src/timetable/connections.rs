//! One day's connections in scan order.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{ConnectionId, StopId, TripId};

use super::TimetableError;

/// A vehicle hop between two consecutive stops of a trip.
///
/// Times are minutes past midnight of the service day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub departure_stop: StopId,
    pub departure: i32,
    pub arrival_stop: StopId,
    pub arrival: i32,
    pub trip: TripId,
    /// Index of this hop within its trip, starting at 0
    pub trip_position: usize,
    /// The trip's following hop, if any
    pub next_in_trip: Option<ConnectionId>,
}

/// Every connection running on one date, by non-increasing departure.
///
/// Ties are broken by later arrival first, then later trip position first, so
/// a trip's hops always appear after the hops that follow them. Rides that take
/// no time sort last among their departure minute; across trips their order is
/// arbitrary and the scan settles them together.
#[derive(Debug, Clone)]
pub struct DayConnections {
    date: NaiveDate,
    connections: Vec<Connection>,
}

impl DayConnections {
    /// Sort `connections` into scan order and link each one to the next hop of
    /// its trip.
    ///
    /// Incoming `next_in_trip` links are ignored and recomputed.
    pub fn new(date: NaiveDate, mut connections: Vec<Connection>) -> Self {
        connections.sort_by(|a, b| {
            b.departure
                .cmp(&a.departure)
                .then(b.arrival.cmp(&a.arrival))
                .then(b.trip_position.cmp(&a.trip_position))
                .then(a.trip.cmp(&b.trip))
        });

        let positions: HashMap<(TripId, usize), ConnectionId> = connections
            .iter()
            .enumerate()
            .map(|(i, c)| ((c.trip, c.trip_position), ConnectionId(i)))
            .collect();

        for connection in &mut connections {
            connection.next_in_trip = positions
                .get(&(connection.trip, connection.trip_position + 1))
                .copied();
        }

        Self { date, connections }
    }

    /// Returns the service date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the number of connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true if nothing runs on this date.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Returns the connection with the given id.
    pub fn get(&self, id: ConnectionId) -> Result<&Connection, TimetableError> {
        self.connections
            .get(id.index())
            .ok_or(TimetableError::ConnectionOutOfRange(id))
    }

    /// Returns the connections in scan order with their ids.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ConnectionId, &Connection)> {
        self.connections
            .iter()
            .enumerate()
            .map(|(i, c)| (ConnectionId(i), c))
    }

    /// Returns the `hops + 1` consecutive connections of a trip starting at
    /// `board`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `board` is unknown or the trip ends early.
    pub fn ride(&self, board: ConnectionId, hops: usize) -> Result<Vec<&Connection>, TimetableError> {
        let mut ride = Vec::with_capacity(hops + 1);
        let mut current = self.get(board)?;
        ride.push(current);
        for _ in 0..hops {
            let next = current.next_in_trip.ok_or_else(|| {
                TimetableError::Invalid(format!(
                    "trip {} ends before {} hops from connection {}",
                    current.trip, hops, board
                ))
            })?;
            current = self.get(next)?;
            ride.push(current);
        }
        Ok(ride)
    }
}
