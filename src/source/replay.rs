//! Replay source: feeds recorded samples from JSON lines.
//!
//! Each non-empty line is one [`LocationSample`]:
//!
//! ```text
//! {"latitude": 28.6149, "longitude": 77.2100, "timestamp": "2025-01-01T10:00:00Z"}
//! ```
//!
//! Lines starting with `#` are comments. A line that fails to parse is
//! delivered as `LocationUnavailable` and replay continues with the next one.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{LocationSource, LocationUpdate, SampleFilter};
use crate::error::LocationError;
use crate::geo::LocationSample;

/// Where replayed samples come from.
#[derive(Debug, Clone)]
pub enum ReplayInput {
    File(PathBuf),
    Stdin,
    /// In-memory feed
    Text(String),
}

impl ReplayInput {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => ReplayInput::Stdin,
            Some(path) => ReplayInput::File(PathBuf::from(path)),
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        Ok(match self {
            ReplayInput::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open sample feed {}", path.display()))?;
                Box::new(BufReader::new(file))
            }
            ReplayInput::Stdin => Box::new(BufReader::new(std::io::stdin())),
            ReplayInput::Text(text) => Box::new(Cursor::new(text.clone().into_bytes())),
        })
    }
}

pub struct ReplaySource {
    input: ReplayInput,
    filter: SampleFilter,
    interval: Duration,
}

impl ReplaySource {
    pub fn new(input: ReplayInput) -> Self {
        Self {
            input,
            filter: SampleFilter::pass_through(),
            interval: Duration::ZERO,
        }
    }

    pub fn with_filter(mut self, filter: SampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Pause between delivered lines, to replay at a walking pace.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Parse one feed line. `None` for blank lines and comments.
pub fn parse_line(line: &str, line_number: usize) -> Option<LocationUpdate> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(
        serde_json::from_str::<LocationSample>(trimmed).map_err(|e| {
            LocationError::unavailable(format!("line {line_number}: {e}"))
        }),
    )
}

impl LocationSource for ReplaySource {
    fn describe(&self) -> String {
        match &self.input {
            ReplayInput::File(path) => format!("replay of {}", path.display()),
            ReplayInput::Stdin => "replay from stdin".to_string(),
            ReplayInput::Text(_) => "in-memory replay".to_string(),
        }
    }

    fn start(
        self: Box<Self>,
        tx: Sender<LocationUpdate>,
        running: Arc<AtomicBool>,
    ) -> Result<JoinHandle<()>> {
        let reader = self.input.open()?;
        let mut filter = self.filter;
        let interval = self.interval;

        let handle = thread::Builder::new()
            .name("redzone-replay".to_string())
            .spawn(move || {
                for (index, line) in reader.lines().enumerate() {
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }

                    let update = match line {
                        Ok(line) => match parse_line(&line, index + 1) {
                            Some(update) => update,
                            None => continue,
                        },
                        Err(e) => Err(LocationError::unavailable(format!("read failed: {e}"))),
                    };

                    if let Ok(sample) = &update
                        && !filter.accept(sample)
                    {
                        continue;
                    }

                    if tx.send(update).is_err() {
                        // Consumer hung up
                        break;
                    }

                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                }
            })
            .context("Failed to spawn replay thread")?;

        Ok(handle)
    }
}
