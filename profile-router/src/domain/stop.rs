//! Resolved boarding points.

use std::fmt;

use super::{StationId, StopId};

/// A stop with its display names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// The stop itself
    pub id: StopId,
    /// Station the stop belongs to
    pub station: StationId,
    /// Station name
    pub name: String,
    /// Platform name, for stops that are not the station itself
    pub platform: Option<String>,
}

impl Stop {
    /// Returns true if the stop is the station rather than one of its platforms.
    pub fn is_station(&self) -> bool {
        self.platform.is_none()
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.platform {
            Some(platform) => write!(f, "{} ({})", self.name, platform),
            None => f.write_str(&self.name),
        }
    }
}
