//! Binary configuration, read from environment variables.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::StationId;
use crate::router::RouterConfig;
use crate::timetable::{MemoryTimetable, Timetable};

/// Errors from reading the configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// A station named on the command line, by id or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationRef {
    Id(StationId),
    Name(String),
}

impl StationRef {
    /// Numeric values are ids; anything else is a name.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.parse::<usize>() {
            Ok(index) => StationRef::Id(StationId(index)),
            Err(_) => StationRef::Name(s.to_owned()),
        }
    }

    /// Look the station up in a loaded timetable.
    pub fn resolve(&self, timetable: &MemoryTimetable) -> Option<StationId> {
        match self {
            StationRef::Id(id) if id.index() < timetable.station_count() => Some(*id),
            StationRef::Id(_) => None,
            StationRef::Name(name) => timetable.station_by_name(name),
        }
    }
}

/// Everything the binary needs to answer one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub timetable_path: PathBuf,
    pub date: NaiveDate,
    pub target: StationRef,
    /// Print journeys from here; without it every station is summarised.
    pub origin: Option<StationRef>,
    pub router: RouterConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns a variable's
    /// value if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let timetable_path = PathBuf::from(required("TIMETABLE_PATH")?);

        let date = required("TRAVEL_DATE")?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            ConfigError::Invalid {
                name: "TRAVEL_DATE",
                reason: e.to_string(),
            }
        })?;

        let target = StationRef::parse(&required("TARGET_STATION")?);
        let origin = lookup("ORIGIN_STATION")
            .filter(|v| !v.trim().is_empty())
            .map(|v| StationRef::parse(&v));

        let router = match lookup("MAX_CHANGES") {
            Some(v) => {
                let max_changes = v.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        name: "MAX_CHANGES",
                        reason: e.to_string(),
                    }
                })?;
                RouterConfig::new(max_changes)
            }
            None => RouterConfig::default(),
        };

        Ok(Self {
            timetable_path,
            date,
            target,
            origin,
            router,
        })
    }
}
