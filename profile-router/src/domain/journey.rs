//! Journey types.
//!
//! A `Journey` is what a rider follows from a departure station to the
//! target: rides on vehicles alternating with walks between stops.

use std::fmt;

use chrono::Duration;

use super::{DomainError, RailTime, Stop, Vehicle};

/// A stop passed through without getting off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateStop {
    pub stop: Stop,
    pub arrival: RailTime,
    pub departure: RailTime,
}

/// A ride on one trip from boarding to alighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    /// Boarding stop
    pub from: Stop,
    pub departure: RailTime,
    /// Alighting stop
    pub to: Stop,
    pub arrival: RailTime,
    /// Stops between boarding and alighting, in calling order
    pub intermediate_stops: Vec<IntermediateStop>,
    pub vehicle: Vehicle,
    /// Route display name
    pub route: String,
    /// Destination shown on the vehicle
    pub destination: String,
}

impl Transport {
    /// Returns the time spent on board.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Check that calling times never run backwards.
    fn validate(&self) -> Result<(), DomainError> {
        let mut previous = self.departure;
        for stop in &self.intermediate_stops {
            if stop.arrival < previous || stop.departure < stop.arrival {
                return Err(DomainError::InvalidLeg(
                    "intermediate stop times must not run backwards",
                ));
            }
            previous = stop.departure;
        }
        if self.arrival < previous {
            return Err(DomainError::InvalidLeg("arrival must not precede departure"));
        }
        Ok(())
    }
}

/// A walk between two stops, or a change at one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Foot {
    pub from: Stop,
    pub departure: RailTime,
    pub to: Stop,
    pub arrival: RailTime,
}

impl Foot {
    /// Returns the walking time.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Returns true if both ends belong to one station.
    pub fn is_transfer(&self) -> bool {
        self.from.station == self.to.station
    }
}

/// One leg of a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg {
    Transport(Transport),
    Foot(Foot),
}

impl Leg {
    /// Returns the stop the leg starts at.
    pub fn from(&self) -> &Stop {
        match self {
            Leg::Transport(t) => &t.from,
            Leg::Foot(f) => &f.from,
        }
    }

    /// Returns the stop the leg ends at.
    pub fn to(&self) -> &Stop {
        match self {
            Leg::Transport(t) => &t.to,
            Leg::Foot(f) => &f.to,
        }
    }

    pub fn departure(&self) -> RailTime {
        match self {
            Leg::Transport(t) => t.departure,
            Leg::Foot(f) => f.departure,
        }
    }

    pub fn arrival(&self) -> RailTime {
        match self {
            Leg::Transport(t) => t.arrival,
            Leg::Foot(f) => f.arrival,
        }
    }

    /// Returns the duration of this leg.
    pub fn duration(&self) -> Duration {
        self.arrival().signed_duration_since(self.departure())
    }

    /// Returns true if this is a ride.
    pub fn is_transport(&self) -> bool {
        matches!(self, Leg::Transport(_))
    }

    /// Returns true if this is a walk.
    pub fn is_foot(&self) -> bool {
        matches!(self, Leg::Foot(_))
    }

    /// Returns the ride if this is one.
    pub fn as_transport(&self) -> Option<&Transport> {
        match self {
            Leg::Transport(t) => Some(t),
            Leg::Foot(_) => None,
        }
    }

    /// Returns the walk if this is one.
    pub fn as_foot(&self) -> Option<&Foot> {
        match self {
            Leg::Transport(_) => None,
            Leg::Foot(f) => Some(f),
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        match self {
            Leg::Transport(t) => t.validate(),
            Leg::Foot(f) if f.arrival < f.departure => {
                Err(DomainError::InvalidLeg("walk must not end before it starts"))
            }
            Leg::Foot(_) => Ok(()),
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Transport(t) => write!(
                f,
                "{} {} -> {} {}  {} {} towards {}",
                t.departure, t.from, t.arrival, t.to, t.vehicle, t.route, t.destination
            ),
            Leg::Foot(w) if w.is_transfer() && w.from == w.to => {
                write!(f, "{} change at {} until {}", w.departure, w.from, w.arrival)
            }
            Leg::Foot(w) => write!(
                f,
                "{} {} -> {} {}  walk",
                w.departure, w.from, w.arrival, w.to
            ),
        }
    }
}

/// A complete journey to the target.
///
/// # Invariants
///
/// - At least one leg
/// - Legs alternate between rides and walks
/// - Each leg starts at the stop the previous one ended at
/// - No leg starts before the previous one ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    legs: Vec<Leg>,
}

impl Journey {
    /// Constructs a journey, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the legs are empty, do not alternate, do not connect,
    /// overlap in time, or if a single leg runs backwards in time.
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        for leg in &legs {
            leg.validate()?;
        }

        for window in legs.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if prev.is_transport() == next.is_transport() {
                return Err(DomainError::LegsNotAlternating);
            }
            if prev.to().id != next.from().id {
                return Err(DomainError::StopsNotConnected(prev.to().id, next.from().id));
            }
            if next.departure() < prev.arrival() {
                return Err(DomainError::LegsOverlap);
            }
        }

        Ok(Journey { legs })
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the rides in order.
    pub fn transports(&self) -> impl Iterator<Item = &Transport> {
        self.legs.iter().filter_map(Leg::as_transport)
    }

    /// Returns the number of changes between vehicles.
    pub fn change_count(&self) -> usize {
        self.transports().count().saturating_sub(1)
    }

    /// Returns the first stop.
    pub fn origin(&self) -> &Stop {
        self.first().from()
    }

    /// Returns the last stop.
    pub fn destination(&self) -> &Stop {
        self.last().to()
    }

    pub fn departure_time(&self) -> RailTime {
        self.first().departure()
    }

    pub fn arrival_time(&self) -> RailTime {
        self.last().arrival()
    }

    /// Returns the total journey duration.
    pub fn duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Returns the total walking time, changes included.
    pub fn walk_duration(&self) -> Duration {
        self.legs
            .iter()
            .filter_map(Leg::as_foot)
            .map(Foot::duration)
            .sum()
    }

    fn first(&self) -> &Leg {
        // Non-empty by construction
        &self.legs[0]
    }

    fn last(&self) -> &Leg {
        &self.legs[self.legs.len() - 1]
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} -> {} ({} min, {} changes)",
            self.departure_time(),
            self.arrival_time(),
            self.duration().num_minutes(),
            self.change_count()
        )?;
        for leg in &self.legs {
            writeln!(f, "  {leg}")?;
        }
        Ok(())
    }
}
