//! Location sources: push-based delivery of samples into the monitor.
//!
//! A source runs on its own thread and pushes [`LocationUpdate`]s into an
//! mpsc channel. The monitor is the single consumer. A failed fix travels
//! down the same channel as an error and never ends the stream.
//!
//! - [`replay`]: JSON-lines feed from a file or stdin
//! - [`filter`]: distance and interval filtering applied before delivery

pub mod filter;
pub mod replay;

use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use crate::error::LocationError;
use crate::geo::LocationSample;

pub use filter::SampleFilter;
pub use replay::{ReplayInput, ReplaySource};

/// One delivery from a location source.
pub type LocationUpdate = Result<LocationSample, LocationError>;

/// A push-based producer of location updates.
///
/// Implementations stop delivering once `running` is cleared or the
/// receiving side hangs up, and drop `tx` when they finish so the consumer
/// sees the end of the stream.
pub trait LocationSource: Send {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    /// Start delivering updates on a background thread.
    fn start(
        self: Box<Self>,
        tx: Sender<LocationUpdate>,
        running: Arc<AtomicBool>,
    ) -> Result<JoinHandle<()>>;
}
