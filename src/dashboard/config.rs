use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types;

/// Settings for the dashboard's background work. All periods are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How often the clock is updated.
    pub clock_tick_secs: u64,
    /// How often the current/next subjects and quiz expiry are re-checked. Scheduling is
    /// done in whole minutes, so anything over 60 is treated as 60.
    pub logic_tick_secs: u64,
    /// How long to wait before resubscribing after a change feed ends or fails.
    pub feed_retry_secs: u64,
    /// Whether the clock uses the 24-hour format.
    pub use_24_hour_clock: bool,
}

impl DashboardConfig {
    /// Loads the configuration from a JSON file. Any missing field takes its default.
    ///
    /// # Parameters
    /// - `path`: The path to the file.
    ///
    /// # Returns
    /// The configuration, or the error if the file couldn't be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> types::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_secs(self.clock_tick_secs.max(1))
    }

    /// The logic tick, kept between one second and one minute.
    pub fn logic_tick(&self) -> Duration {
        Duration::from_secs(self.logic_tick_secs.clamp(1, 60))
    }

    pub fn feed_retry_delay(&self) -> Duration {
        Duration::from_secs(self.feed_retry_secs)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            clock_tick_secs: 1,
            logic_tick_secs: 60,
            feed_retry_secs: 5,
            use_24_hour_clock: false,
        }
    }
}
