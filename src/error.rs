//! Per-sample failure taxonomy.
//!
//! None of these are fatal: a failed sample is skipped and the monitoring
//! state stays exactly as it was before the sample arrived.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// The location source failed to produce a fix.
    #[error("location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    /// A coordinate fell outside the valid latitude/longitude range.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

impl LocationError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        LocationError::LocationUnavailable {
            reason: reason.into(),
        }
    }
}
