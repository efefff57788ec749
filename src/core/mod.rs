//! Core monitoring logic.
//!
//! - [`monitor`]: the containment state machine (`evaluate`)
//! - [`alert`]: the one-shot alert dispatcher (`on_event`)
//! - [`session`]: zones plus monitoring state for one application session
//!
//! [`Core`] runs the main loop: it starts the location source, consumes its
//! updates one at a time, pushes each through the session and hands the
//! resulting side effects to the sink. No update is evaluated before the
//! previous one has been fully handled.

pub mod alert;
pub mod monitor;
pub mod session;

use anyhow::Result;
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use crate::{
    common::constants::MONITOR_POLL_INTERVAL_MS,
    config::Config,
    error::LocationError,
    geo::LocationSample,
    io::signals::SignalState,
    sink::{AlertSink, execute_all},
    source::LocationSource,
};
use monitor::TransitionEvent;
use session::{Outcome, Session};

/// Parameters for creating a Core instance.
pub struct CoreParams {
    pub source: Box<dyn LocationSource>,
    pub sink: Box<dyn AlertSink>,
    pub config: Config,
    pub signal_state: SignalState,
    pub session: Session,
    pub debug_enabled: bool,
}

/// Main loop state.
pub struct Core {
    source: Option<Box<dyn LocationSource>>,
    sink: Box<dyn AlertSink>,
    config: Config,
    signal_state: SignalState,
    session: Session,
    debug_enabled: bool,
}

impl Core {
    pub fn new(params: CoreParams) -> Self {
        Self {
            source: Some(params.source),
            sink: params.sink,
            config: params.config,
            signal_state: params.signal_state,
            session: params.session,
            debug_enabled: params.debug_enabled,
        }
    }

    /// Run until the feed ends or a shutdown is requested.
    ///
    /// Returns the session so its monitoring state can be resumed later.
    pub fn execute(mut self) -> Result<Session> {
        let Some(source) = self.source.take() else {
            anyhow::bail!("Location source already consumed");
        };

        log_block_start!("Watching location: {}", source.describe());

        let (tx, rx) = channel();
        let handle = source.start(tx, self.signal_state.running.clone())?;

        let poll = Duration::from_millis(MONITOR_POLL_INTERVAL_MS);
        let fix_timeout = Duration::from_millis(self.config.fix_timeout_ms());
        let mut waiting_since = Instant::now();
        let mut feed_ended = false;

        while self.signal_state.is_running() {
            if self.signal_state.take_resume_request() {
                self.resume();
            }

            match rx.recv_timeout(poll) {
                Ok(Ok(sample)) => {
                    waiting_since = Instant::now();
                    self.handle_sample(&sample);
                }
                Ok(Err(error)) => {
                    waiting_since = Instant::now();
                    self.session.location_unavailable(error);
                }
                Err(RecvTimeoutError::Timeout) => {
                    if waiting_since.elapsed() >= fix_timeout {
                        self.session.location_unavailable(LocationError::unavailable(
                            format!("no fix within {} ms", fix_timeout.as_millis()),
                        ));
                        waiting_since = Instant::now();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    feed_ended = true;
                    break;
                }
            }
        }

        if feed_ended {
            log_block_start!("Location feed ended");
            // The producer has already dropped its sender, so this returns promptly
            if handle.join().is_err() {
                log_warning!("Location source thread panicked");
            }
        } else {
            // The source may be blocked on a read; let it notice the flag on its own
            log_block_start!("Location watching stopped");
        }

        log_indented!("Status: {}", self.session.status());
        Ok(self.session)
    }

    fn handle_sample(&mut self, sample: &LocationSample) {
        if self.debug_enabled {
            log_pipe!();
            log_debug!("📍 {}", sample.coordinate());
        }

        // Rejected samples are logged by the session and leave the state alone
        if let Ok(outcome) = self.session.process(sample) {
            self.dispatch(&outcome);
        }
    }

    fn resume(&mut self) {
        if let Some(outcome) = self.session.resume() {
            self.dispatch(&outcome);
        }
        log_block_start!("Re-checked last position");
        log_indented!("Status: {}", self.session.status());
    }

    fn dispatch(&mut self, outcome: &Outcome) {
        match &outcome.event {
            TransitionEvent::None => return,
            TransitionEvent::Entered { zone, distance } => {
                log_block_start!("Entered {} ({:.2} m from center)", zone.name, distance);
            }
            TransitionEvent::Exited { zone } => {
                log_block_start!("Left {}", zone.name);
            }
        }

        execute_all(self.sink.as_mut(), &outcome.effects);

        if let Err(e) = self.sink.status_changed(&self.session.status()) {
            log_warning!("Failed to report status: {e}");
        }
    }
}
