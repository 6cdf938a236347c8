//! Router configuration.

use crate::bits::MAX_CHANGES;

use super::RouterError;

/// Configuration parameters for profile computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Maximum number of vehicle changes a journey may take.
    ///
    /// Tuples needing more changes are never recorded.
    pub max_changes: u32,
}

impl RouterConfig {
    /// Create a new configuration with the given change limit.
    pub fn new(max_changes: u32) -> Self {
        Self { max_changes }
    }

    /// Check the configuration against the criterion codec limits.
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.max_changes > MAX_CHANGES {
            return Err(RouterError::InvalidConfig(format!(
                "max_changes {} exceeds {}",
                self.max_changes, MAX_CHANGES
            )));
        }
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_changes: MAX_CHANGES,
        }
    }
}
