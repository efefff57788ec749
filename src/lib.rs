//! # Redzone Library
//!
//! Internal library for the redzone binary application.
//!
//! This library exists to enable testing of the monitoring internals and
//! provide clean separation between CLI dispatch (main.rs) and application
//! logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Redzone` builder wires config, signals, source and sink
//! - **Core Logic**: `core` module with the geofence state machine, the alert
//!   dispatcher, the session and the main loop
//! - **Geographic**: `geo` for coordinates and great-circle distance, `zones`
//!   for the red zone model and generator
//! - **Location**: `source` module with the push-based location source and
//!   the JSON-lines replay feed
//! - **Side Effects**: `sink` module with the terminal and JSON-lines sinks
//! - **Configuration**: `config` module for TOML-based settings
//! - **Infrastructure**: signal handling, logging and shared constants

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod geo;
pub mod io;
pub mod sink;
pub mod source;
pub mod zones;

// Internal modules
mod redzone;

// Re-export for binary
pub use crate::core::alert::{SideEffect, on_event};
pub use crate::core::monitor::{MonitoringState, TransitionEvent, evaluate};
pub use crate::core::session::{SafetyStatus, Session};
pub use error::LocationError;
pub use geo::{Coordinate, LocationSample, distance};
pub use redzone::Redzone;
pub use zones::{Zone, make_zones};
