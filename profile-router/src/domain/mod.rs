//! Domain types for the profile router.
//!
//! This module contains the value types shared by the timetable, the router
//! and the journeys it produces. Types that carry invariants enforce them at
//! construction time.

mod error;
mod ids;
mod journey;
mod stop;
mod time;
mod vehicle;

pub use error::DomainError;
pub use ids::{ConnectionId, RouteId, StationId, StopId, TripId};
pub use journey::{Foot, IntermediateStop, Journey, Leg, Transport};
pub use stop::Stop;
pub use time::{RailTime, TimeError, parse_day_minutes};
pub use vehicle::Vehicle;
