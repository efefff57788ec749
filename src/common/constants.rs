//! Application-wide constants: geodesy, zone layout, alert effects and config defaults.

// # Process exit codes
pub const EXIT_FAILURE: i32 = 1;

// # Geodesy

/// Mean Earth radius used by the haversine distance, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

// # Red zone layout
//
// (id, latitude offset, longitude offset, radius in meters, name).
// 0.001 degrees of latitude is roughly 110 m, 0.0005 roughly 55 m.
pub const RED_ZONE_LAYOUT: [(u32, f64, f64, f64, &str); 3] = [
    (1, 0.001, 0.001, 50.0, "Restricted Area 1"),
    (2, -0.001, -0.0005, 60.0, "Restricted Area 2"),
    (3, 0.0005, -0.001, 70.0, "Restricted Area 3"),
];

// # Alert effects

/// Vibration pattern in milliseconds: wait, vibrate, pause, vibrate, pause, vibrate.
pub const ALERT_VIBRATION_PATTERN: [u64; 6] = [0, 1000, 500, 1000, 500, 1000];
pub const ALERT_TITLE: &str = "RED ZONE ALERT";

// # Configuration defaults and limits
pub const CONFIG_FILE_NAME: &str = "redzone.toml";
pub const CONFIG_DIR_NAME: &str = "redzone";

pub const DEFAULT_DISTANCE_FILTER: f64 = 0.5; // meters
pub const MINIMUM_DISTANCE_FILTER: f64 = 0.0;
pub const MAXIMUM_DISTANCE_FILTER: f64 = 1000.0;

pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1000;
pub const MAXIMUM_MIN_INTERVAL_MS: u64 = 60_000;

pub const DEFAULT_FIX_TIMEOUT_MS: u64 = 30_000;
pub const MINIMUM_FIX_TIMEOUT_MS: u64 = 1000;
pub const MAXIMUM_FIX_TIMEOUT_MS: u64 = 600_000;

pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 0;
pub const MAXIMUM_REPLAY_INTERVAL_MS: u64 = 60_000;

pub const DEFAULT_VIBRATION_CANCEL_MS: u64 = 3000;
pub const MAXIMUM_VIBRATION_CANCEL_MS: u64 = 60_000;

pub const DEFAULT_ALERT_SOUND: &str = "alert.mp3";

// # Monitor loop

/// How often the monitor wakes up to check signals and the fix timeout.
pub const MONITOR_POLL_INTERVAL_MS: u64 = 100;
