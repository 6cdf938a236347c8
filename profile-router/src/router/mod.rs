//! Profile routing with the connection scan algorithm.
//!
//! [`Router::compute_profile`] sweeps one date's connections backwards in
//! time and records, for every station, the Pareto front of ways to reach a
//! target station. [`extract_journeys`] turns a station's front back into
//! rider-facing journeys.

mod backpointer;
mod config;
mod error;
mod extract;
mod profile;
mod scan;


pub use backpointer::Backpointer;
pub use config::RouterConfig;
pub use error::RouterError;
pub use extract::extract_journeys;
pub use profile::Profile;
pub use scan::Router;
