//! Pareto fronts of packed criteria.
//!
//! A front is the minimal set of tuples none of which dominates another.
//! Fronts are grown through a [`FrontBuilder`] and frozen into an immutable
//! [`ParetoFront`] once complete.

mod front;

pub use front::{FrontBuilder, FrontError, ParetoFront};
