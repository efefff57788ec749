//! Application coordinator that wires a monitoring run together.
//!
//! It handles configuration loading, signal setup, choosing the location
//! source and the side-effect sink, and then hands control to [`Core`].
//!
//! ```no_run
//! use redzone::Redzone;
//! use redzone::source::ReplayInput;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Replay a recorded walk and render alerts in the terminal
//! Redzone::new(false)
//!     .with_input(ReplayInput::from_arg(Some("walk.jsonl")))
//!     .run()?;
//!
//! // Read samples from stdin and emit side effects as JSON lines
//! Redzone::new(false).json_output().without_headers().run()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::time::Duration;

use crate::{
    config::{self, Config},
    core::{Core, CoreParams, session::Session},
    io::signals::{SignalState, setup_signal_handler},
    sink::{AlertSink, JsonSink, TerminalSink},
    source::{ReplayInput, ReplaySource, SampleFilter},
};

/// Builder for a monitoring run.
pub struct Redzone {
    debug_enabled: bool,
    input: ReplayInput,
    json_output: bool,
    show_headers: bool,
    config: Option<Config>,
    signal_state: Option<SignalState>,
}

impl Redzone {
    /// Create a runner reading samples from stdin with terminal output
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            input: ReplayInput::Stdin,
            json_output: false,
            show_headers: true,
            config: None,
            signal_state: None,
        }
    }

    pub fn with_input(mut self, input: ReplayInput) -> Self {
        self.input = input;
        self
    }

    /// Emit side effects as JSON lines on stdout instead of rendering them
    pub fn json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Skip header display
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Use this configuration instead of loading one from disk
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use these flags instead of installing process signal handlers
    #[cfg(feature = "testing-support")]
    pub fn with_signal_state(mut self, signal_state: SignalState) -> Self {
        self.signal_state = Some(signal_state);
        self
    }

    /// Execute the run and return the session with its final monitoring state.
    pub fn run(self) -> Result<Session> {
        if self.json_output {
            // stdout belongs to the JSON stream
            crate::logger::Log::set_enabled(false);
        }

        if self.show_headers {
            log_version!();
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled - logging distance to every zone");
            }
        }

        let config = match self.config {
            Some(config) => config,
            None => config::load().context("Configuration failed")?,
        };

        if let Some(custom_dir) = config::get_custom_config_dir() {
            log_block_start!("Base directory: {}", custom_dir.display());
        }
        config.log_config();

        let signal_state = match self.signal_state {
            Some(signal_state) => signal_state,
            None => setup_signal_handler(self.debug_enabled)?,
        };

        let source = ReplaySource::new(self.input)
            .with_filter(SampleFilter::new(
                config.distance_filter(),
                config.min_interval_ms(),
            ))
            .with_interval(Duration::from_millis(config.replay_interval_ms()));

        let sink: Box<dyn AlertSink> = if self.json_output {
            Box::new(JsonSink::new(std::io::stdout()))
        } else {
            Box::new(TerminalSink::new(&config))
        };

        let core = Core::new(CoreParams {
            source: Box::new(source),
            sink,
            config,
            signal_state,
            session: Session::new(self.debug_enabled),
            debug_enabled: self.debug_enabled,
        });

        core.execute()
    }
}
