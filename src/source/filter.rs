//! Sample filtering before delivery.
//!
//! Mirrors the watch options of a mobile location API: a sample is only
//! delivered when it moved at least `distance_filter` meters and arrived at
//! least `min_interval` after the last delivered sample. The first sample
//! always passes, and so does any sample with an out-of-range coordinate.

use chrono::Duration;

use crate::geo::{LocationSample, distance};

#[derive(Debug, Clone)]
pub struct SampleFilter {
    distance_filter: f64,
    min_interval: Duration,
    last_delivered: Option<LocationSample>,
}

impl SampleFilter {
    pub fn new(distance_filter: f64, min_interval_ms: u64) -> Self {
        Self {
            distance_filter,
            min_interval: Duration::milliseconds(min_interval_ms as i64),
            last_delivered: None,
        }
    }

    /// A filter that lets every sample through.
    pub fn pass_through() -> Self {
        Self::new(0.0, 0)
    }

    /// Decide whether `sample` should be delivered, remembering it if so.
    ///
    /// Out-of-range samples always pass so the session can reject them, but
    /// they never become the reference for later samples.
    pub fn accept(&mut self, sample: &LocationSample) -> bool {
        if sample.coordinate().validate().is_err() {
            return true;
        }
        if let Some(last) = &self.last_delivered {
            let moved = distance(&last.coordinate(), &sample.coordinate());
            if moved < self.distance_filter {
                return false;
            }
            if sample.timestamp - last.timestamp < self.min_interval {
                return false;
            }
        }
        self.last_delivered = Some(sample.clone());
        true
    }
}
