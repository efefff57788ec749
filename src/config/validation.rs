//! Configuration validation.
//!
//! Rejects values outside their documented ranges with a message naming the
//! offending field.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(meters) = config.distance_filter
        && !(MINIMUM_DISTANCE_FILTER..=MAXIMUM_DISTANCE_FILTER).contains(&meters)
    {
        anyhow::bail!(
            "distance_filter ({} m) must be between {} and {} meters",
            meters,
            MINIMUM_DISTANCE_FILTER,
            MAXIMUM_DISTANCE_FILTER
        );
    }

    if let Some(ms) = config.min_interval_ms
        && ms > MAXIMUM_MIN_INTERVAL_MS
    {
        anyhow::bail!(
            "min_interval_ms ({} ms) must be at most {} milliseconds",
            ms,
            MAXIMUM_MIN_INTERVAL_MS
        );
    }

    if let Some(ms) = config.fix_timeout_ms
        && !(MINIMUM_FIX_TIMEOUT_MS..=MAXIMUM_FIX_TIMEOUT_MS).contains(&ms)
    {
        anyhow::bail!(
            "fix_timeout_ms ({} ms) must be between {} and {} milliseconds",
            ms,
            MINIMUM_FIX_TIMEOUT_MS,
            MAXIMUM_FIX_TIMEOUT_MS
        );
    }

    if let Some(ms) = config.replay_interval_ms
        && ms > MAXIMUM_REPLAY_INTERVAL_MS
    {
        anyhow::bail!(
            "replay_interval_ms ({} ms) must be at most {} milliseconds",
            ms,
            MAXIMUM_REPLAY_INTERVAL_MS
        );
    }

    if let Some(ms) = config.vibration_cancel_ms
        && ms > MAXIMUM_VIBRATION_CANCEL_MS
    {
        anyhow::bail!(
            "vibration_cancel_ms ({} ms) must be at most {} milliseconds",
            ms,
            MAXIMUM_VIBRATION_CANCEL_MS
        );
    }

    if let Some(sound) = &config.alert_sound
        && sound.trim().is_empty()
    {
        anyhow::bail!("alert_sound must not be empty");
    }

    Ok(())
}
