//! Main application entry point and high-level flow coordination.
//!
//! Argument parsing happens first; help and version exit early. One-shot
//! commands (`zones`, `distance`) print their result and return. A run goes
//! through the `Redzone` builder:
//!
//! - Terminal output: `Redzone::new(debug).with_input(input).run()`
//! - JSON output: `Redzone::new(debug).with_input(input).json_output().without_headers().run()`
//!
//! Startup failures (unreadable config or sample file) end the process with
//! a failure exit code. Per-sample failures never do.

use anyhow::Result;

use redzone::Redzone;
use redzone::args::{self, CliAction, ParsedArgs};
use redzone::commands;
use redzone::common::constants::EXIT_FAILURE;
use redzone::config;
use redzone::logger::{self, Log};
use redzone::source::ReplayInput;

fn run(
    debug_enabled: bool,
    config_dir: Option<String>,
    samples: Option<String>,
    json_output: bool,
    log_file: Option<String>,
) -> Result<()> {
    if let Some(dir) = config_dir {
        config::set_config_dir(Some(dir))?;
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match log_file {
        Some(path) => Some(Log::start_file_logging(path)?),
        None => None,
    };

    let mut runner =
        Redzone::new(debug_enabled).with_input(ReplayInput::from_arg(samples.as_deref()));
    if json_output {
        runner = runner.json_output().without_headers();
    }

    runner.run()?;
    Ok(())
}

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            samples,
            json_output,
            log_file,
        } => run(debug_enabled, config_dir, samples, json_output, log_file),
        CliAction::ZonesCommand {
            latitude,
            longitude,
        } => commands::zones::handle_zones_command(latitude, longitude),
        CliAction::DistanceCommand { from, to } => {
            commands::distance::handle_distance_command(from, to)
        }
    };

    if let Err(e) = result {
        logger::report_fatal(&e, Log::is_enabled(), &mut std::io::stderr());
        std::process::exit(EXIT_FAILURE);
    }
}
