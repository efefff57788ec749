//! Configuration system for redzone.
//!
//! Settings live in `redzone.toml`, searched for in:
//! 1. the directory given with `--config DIR`
//! 2. **XDG_CONFIG_HOME**/redzone/redzone.toml
//!
//! Every field is optional. A missing file is not an error; defaults from
//! [`crate::common::constants`] apply to anything left out.
//!
//! ```toml
//! #[Location watching]
//! distance_filter = 0.5        # Meters between delivered samples (0-1000)
//! min_interval_ms = 1000       # Fastest delivery interval (0-60000)
//! fix_timeout_ms = 30000       # Report the location as unavailable after this (1000-600000)
//! replay_interval_ms = 0       # Delay between replayed samples (0-60000)
//!
//! #[Alert]
//! vibration_cancel_ms = 3000   # Stop vibrating after this many milliseconds (0-60000)
//! alert_sound = "alert.mp3"    # Sound played on zone entry
//! ```
//!
//! Zone geometry is fixed and not configurable.

pub mod loading;
pub mod validation;

use serde::Deserialize;

use crate::common::constants::*;

pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Settings loaded from `redzone.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Minimum movement in meters before a new sample is delivered.
    pub distance_filter: Option<f64>,
    /// Minimum time between delivered samples.
    pub min_interval_ms: Option<u64>,
    /// How long to wait for a fix before reporting the location as unavailable.
    pub fix_timeout_ms: Option<u64>,
    /// Pause between lines when replaying a recorded feed.
    pub replay_interval_ms: Option<u64>,
    /// Vibration is cancelled this long after it starts.
    pub vibration_cancel_ms: Option<u64>,
    /// Sound file played on zone entry.
    pub alert_sound: Option<String>,
}

impl Config {
    pub fn distance_filter(&self) -> f64 {
        self.distance_filter.unwrap_or(DEFAULT_DISTANCE_FILTER)
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms.unwrap_or(DEFAULT_MIN_INTERVAL_MS)
    }

    pub fn fix_timeout_ms(&self) -> u64 {
        self.fix_timeout_ms.unwrap_or(DEFAULT_FIX_TIMEOUT_MS)
    }

    pub fn replay_interval_ms(&self) -> u64 {
        self.replay_interval_ms.unwrap_or(DEFAULT_REPLAY_INTERVAL_MS)
    }

    pub fn vibration_cancel_ms(&self) -> u64 {
        self.vibration_cancel_ms.unwrap_or(DEFAULT_VIBRATION_CANCEL_MS)
    }

    pub fn alert_sound(&self) -> &str {
        self.alert_sound.as_deref().unwrap_or(DEFAULT_ALERT_SOUND)
    }

    /// Log the effective settings.
    pub fn log_config(&self) {
        log_block_start!("Location watching");
        log_indented!("Distance filter: {} m", self.distance_filter());
        log_indented!("Minimum interval: {} ms", self.min_interval_ms());
        log_indented!("Fix timeout: {} ms", self.fix_timeout_ms());
        if self.replay_interval_ms() > 0 {
            log_indented!("Replay interval: {} ms", self.replay_interval_ms());
        }
        log_block_start!("Alert");
        log_indented!("Vibration cancelled after: {} ms", self.vibration_cancel_ms());
        log_indented!("Sound: {}", self.alert_sound());
    }
}

#[cfg(test)]
mod tests;
