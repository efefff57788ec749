//! One-shot CLI commands.
//!
//! Each command lives in its own submodule and returns once its output has
//! been printed; only `run` starts the monitoring loop.

pub mod distance;
pub mod zones;
