//! Structured logging system with visual formatting.
//!
//! This module provides the logging system used for redzone's terminal output.
//! It includes different log levels and special formatting functions for creating
//! structured output with Unicode box drawing characters, so zone entries, exits
//! and alerts read as distinct blocks while a feed is being monitored.
//!
//! The logger supports runtime enable/disable functionality for quiet operation
//! during automated processes or testing, and an optional file sink.

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

// Use an AtomicBool instead of thread_local for thread safety
static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Prefix every line with the wall-clock time (enabled for file logging)
static TIMESTAMPS_ENABLED: AtomicBool = AtomicBool::new(false);

// Channel for routing output to file when --log is active
static LOG_CHANNEL: OnceLock<Option<Sender<LogMessage>>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Main logging interface providing structured output formatting.
///
/// ## Logging Conventions
///
/// To maintain a consistent and readable log output, adhere to the following conventions
/// when using the visual formatting macros:
///
/// - **`log_block_start!`**:
///   - **Purpose**: Always use this to initiate a new, distinct conceptual block of log information,
///     especially for major state changes or significant events (e.g., "Entered Restricted Area 1",
///     "Loading configuration", "Red zones created").
///   - **Output**: Prepends an empty pipe `┃` for spacing from any previous log, then prints `┣ message`.
///   - **Usage**: Subsequent related messages within this conceptual block should typically use
///     `log_decorated!` or `log_indented!`.
///
/// - **`log_decorated!`**:
///   - **Purpose**: For logging messages that are part of an existing block started by `log_block_start!`,
///     or for simple, single-line status messages that don't warrant a full block but still fit the pipe structure.
///   - **Output**: Prints `┣ message`.
///   - **Context**: If this message is a continuation of a `log_block_start!`, it will appear visually connected.
///
/// - **`log_indented!`**:
///   - **Purpose**: For nested data or detailed sub-items that belong to a parent message
///     (often logged with `log_block_start!` or `log_decorated!`). Useful for listing configuration items,
///     multi-part details, etc.
///   - **Output**: Prints `┃   message` (pipe, three spaces, then message).
///
/// - **`log_pipe!`**:
///   - **Purpose**: Used explicitly to insert a single, empty, prefixed line (`┃`) for vertical spacing.
///   - **Usage**: Its primary use-case is to create visual separation to initiate a block *before* using
///     `log_warning!`, `log_error!`, `log_critical!`, `log_info!`, `log_debug!`, or logging
///     an `anyhow` error message.
///     Avoid using it if it might lead to double pipes or unnecessary empty lines before a `log_block_start!`
///     (which already provides top spacing) or `log_end!`. *Not for use at the end of a block.
///
/// - **`log_version!`**:
///   - **Purpose**: Prints the application startup header. Typically called once at the beginning.
///   - **Output**: `┏ redzone vX.Y.Z ━━╸`.
///
/// - **`log_end!`**:
///   - **Purpose**: Prints the final log termination marker. Called once at shutdown.
///   - **Output**: `╹`.
///
/// - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`, `log_critical!`**:
///   - **Purpose**: These are standard semantic logging macros. They use a `[LEVEL]` prefix
///     (e.g., `[INFO]`, `[WARNING]`, `[ERROR]`) and do not use the box-drawing characters.
///   - **Usage**: Use them for their semantic meaning when a message doesn't fit the structured
///     box-drawing style or when a specific log level prefix is more appropriate.
///     If they begin a new conceptual block of information that is *not* part of the primary
///     box-drawing flow, they ought to begin with a `log_pipe!`.
pub struct Log;

impl Log {
    /// Enable or disable logging temporarily.
    ///
    /// This is useful for quiet operation during automated processes
    /// or testing where log output would interfere with results.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable the `[HH:MM:SS]` prefix on every line.
    pub fn set_timestamps(enabled: bool) {
        TIMESTAMPS_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Start file logging to the specified path.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        // Install the channel
        LOG_CHANNEL
            .set(Some(tx.clone()))
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        // Spawn logger thread
        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => {
                        file.write_all(text.as_bytes())?;
                    }
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Self::set_timestamps(true);

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    // # Helper Functions

    /// Get the timestamp prefix for the current line.
    /// Returns an empty string unless timestamps are enabled.
    /// Public for macro access.
    pub fn get_timestamp_prefix() -> String {
        if TIMESTAMPS_ENABLED.load(Ordering::SeqCst) {
            format!("[{}] ", chrono::Local::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Guard for file logging that ensures clean shutdown.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        // LOG_CHANNEL stays installed; OnceLock can only be set once per process
    }
}

// Helper function to strip ANSI color codes from text
pub(crate) fn strip_ansi_codes(text: &str) -> String {
    // Regex pattern for ANSI escape sequences
    // Matches: ESC [ ... m where ... is any sequence of digits and semicolons
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // Check if this is the start of an ANSI sequence
            if chars.peek() == Some(&'[') {
                chars.next(); // consume '['
                // Skip until we find 'm'
                for ch in chars.by_ref() {
                    if ch == 'm' {
                        break;
                    }
                }
            } else {
                result.push(ch);
            }
        } else {
            result.push(ch);
        }
    }

    result
}

// Public function that routes output (needed by macros)
pub fn write_output(text: &str) {
    if let Some(Some(tx)) = LOG_CHANNEL.get() {
        // Send to file logger thread - strip ANSI codes for clean file output
        let clean_text = strip_ansi_codes(text);
        let _ = tx.send(LogMessage::Formatted(clean_text));
    } else {
        // Normal output with colors
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// Format one line with the given lead and route it (needed by macros).
///
/// `spacer` prepends an empty pipe line, the way block starts separate
/// themselves from whatever was logged before.
pub fn emit(spacer: bool, lead: &str, message: std::fmt::Arguments<'_>) {
    if !Log::is_enabled() {
        return;
    }
    let prefix = Log::get_timestamp_prefix();
    let formatted = if spacer {
        format!("{prefix}┃\n{prefix}{lead}{message}\n")
    } else {
        format!("{prefix}{lead}{message}\n")
    };
    write_output(&formatted);
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block or for standalone emphasis.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┣ ", format_args!($($arg)*))
    };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┃   ", format_args!($($arg)*))
    };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit(false, "┃", format_args!(""))
    };
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {
        $crate::logger::emit(true, "┣ ", format_args!($($arg)*))
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit(
            false,
            "┏ ",
            format_args!("redzone v{} ━━╸", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit(false, "╹", format_args!(""))
    };
}

/// Log a warning message with pipe prefix and yellow-colored text.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┣[\x1b[33mWARNING\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log a warning message without the pipe prefix (standalone).
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "[\x1b[33mWARNING\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log an error message with pipe prefix and red-colored text.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┣[\x1b[31mERROR\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log an error message that terminates the flow, with a pipe above and a terminal corner.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {
        $crate::logger::emit(true, "┗[\x1b[31mERROR\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log an informational message with pipe prefix and green-colored text.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┣[\x1b[32mINFO\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log a debug/operational message with pipe prefix and green-colored text.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┣[\x1b[32mDEBUG\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Log a critical message with pipe prefix and red-colored text.
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)*) => {
        $crate::logger::emit(false, "┣[\x1b[31mCRITICAL\x1b[0m] ", format_args!($($arg)*))
    };
}

/// Report a fatal error exactly once.
///
/// With logging on the error goes through the log like everything else;
/// with logging off (JSON output owns stdout) it is written to `stderr`.
pub fn report_fatal(error: &anyhow::Error, logging_enabled: bool, stderr: &mut impl Write) {
    if logging_enabled {
        log_error_exit!("{error:#}");
    } else {
        let _ = writeln!(stderr, "Error: {error:#}");
        let _ = stderr.flush();
    }
}
