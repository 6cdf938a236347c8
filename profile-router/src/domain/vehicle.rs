//! Vehicle kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of vehicle running a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vehicle {
    Tram,
    Metro,
    Train,
    Bus,
    Ferry,
    AerialLift,
    Funicular,
}

impl Vehicle {
    /// Returns the lowercase display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Vehicle::Tram => "tram",
            Vehicle::Metro => "metro",
            Vehicle::Train => "train",
            Vehicle::Bus => "bus",
            Vehicle::Ferry => "ferry",
            Vehicle::AerialLift => "aerial lift",
            Vehicle::Funicular => "funicular",
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
