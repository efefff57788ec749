//! Signal handling for the monitor.
//!
//! - SIGINT, SIGTERM, SIGHUP: tear down the location stream. The session and
//!   its monitoring state survive and are handed back to the caller.
//! - SIGUSR1: re-check the last known position, like an app returning to
//!   the foreground.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR1},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// Flags shared between the signal thread and the monitor loop.
#[derive(Debug, Clone)]
pub struct SignalState {
    /// Cleared when the monitor should stop
    pub running: Arc<AtomicBool>,
    /// Set when a re-check of the last sample was requested
    pub resume_requested: Arc<AtomicBool>,
}

impl SignalState {
    /// Flags with no signal handlers attached.
    pub fn detached() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            resume_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Take a pending resume request, clearing it.
    pub fn take_resume_request(&self) -> bool {
        self.resume_requested.swap(false, Ordering::SeqCst)
    }
}

/// Register signal handlers and spawn the thread that services them.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR1])
        .context("failed to register signal handlers")?;

    let thread_state = state.clone();
    thread::Builder::new()
        .name("redzone-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                match sig {
                    SIGUSR1 => {
                        if debug_enabled {
                            log_pipe!();
                            log_debug!("Received SIGUSR1, re-checking last position");
                        }
                        thread_state.resume_requested.store(true, Ordering::SeqCst);
                    }
                    _ => {
                        if debug_enabled {
                            log_pipe!();
                            log_debug!("Received shutdown signal {sig}");
                        }
                        thread_state.request_shutdown();
                        break;
                    }
                }
            }
        })
        .context("failed to spawn signal handler thread")?;

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_state_defaults() {
        let state = SignalState::detached();
        assert!(state.is_running());
        assert!(!state.take_resume_request());
    }

    #[test]
    fn test_resume_request_is_consumed() {
        let state = SignalState::detached();
        state.resume_requested.store(true, Ordering::SeqCst);
        assert!(state.take_resume_request());
        assert!(!state.take_resume_request());
    }

    #[test]
    fn test_shutdown_visible_to_clones() {
        let state = SignalState::detached();
        let clone = state.clone();
        clone.request_shutdown();
        assert!(!state.is_running());
    }
}
