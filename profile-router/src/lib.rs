//! Transit profile routing.
//!
//! Answers "for every station, what are all the best ways to reach this
//! target today?" with a profile connection scan over a daily timetable.
//! Each station gets the Pareto front of departure time, arrival time and
//! number of changes, and any of its tuples can be turned back into a
//! journey with walks and rides.

pub mod bits;
pub mod cache;
pub mod config;
pub mod domain;
pub mod pareto;
pub mod router;
pub mod timetable;
