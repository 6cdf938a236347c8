//! Dense index types.
//!
//! Every entity of a timetable is addressed by its position in a table. The
//! newtypes keep a station index from being passed where a trip index is
//! expected.

use std::fmt;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl $name {
            /// Returns the table index.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(
    /// A station, the unit journeys start and end at.
    StationId
);

index_type!(
    /// A boarding point: either a station itself or one of its platforms.
    ///
    /// Ids below the timetable's station count name stations; the ids above
    /// them name platforms.
    ///
    /// ```
    /// use profile_router::domain::StopId;
    ///
    /// let stop = StopId(3);
    /// assert_eq!(stop.index(), 3);
    /// assert_eq!(stop.to_string(), "3");
    /// ```
    StopId
);

index_type!(
    /// A single run of a vehicle along its stops.
    TripId
);

index_type!(
    /// A named line that trips belong to.
    RouteId
);

index_type!(
    /// A position in one day's connection list.
    ConnectionId
);

impl From<StationId> for StopId {
    fn from(station: StationId) -> Self {
        StopId(station.0)
    }
}
