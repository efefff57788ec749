//! Command-line argument parsing and processing.
//!
//! This module turns the raw argument list into a [`CliAction`]. Flags may
//! appear anywhere. Arguments that parse as numbers are always positional,
//! so negative coordinates such as `-33.8688` are not mistaken for flags.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Monitor a replayed location feed
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// Sample feed path; `None` or `-` reads stdin
        samples: Option<String>,
        json_output: bool,
        log_file: Option<String>,
    },
    /// Print the zones derived from an origin
    ZonesCommand { latitude: f64, longitude: f64 },
    /// Print the great-circle distance between two points
    DistanceCommand {
        from: (f64, f64),
        to: (f64, f64),
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

fn is_number(arg: &str) -> bool {
    arg.parse::<f64>().is_ok()
}

fn parse_numbers(values: &[String]) -> Option<Vec<f64>> {
    values.iter().map(|v| v.parse::<f64>().ok()).collect()
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut json_output = false;
        let mut config_dir: Option<String> = None;
        let mut samples: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut unknown_arg_found = false;
        let mut positionals: Vec<String> = Vec::new();

        // Convert to vector for easier indexed access
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = args_vec[idx].as_str();
            match arg {
                "--debug" | "-d" => debug_enabled = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--json" | "-j" => json_output = true,
                "--config" | "-c" | "--samples" | "-s" | "--log" | "-l" => {
                    let Some(value) = args_vec.get(idx + 1) else {
                        log_warning_standalone!("Missing value for {}", arg);
                        unknown_arg_found = true;
                        break;
                    };
                    match arg {
                        "--config" | "-c" => config_dir = Some(value.clone()),
                        "--samples" | "-s" => samples = Some(value.clone()),
                        _ => log_file = Some(value.clone()),
                    }
                    idx += 1;
                }
                "-" => positionals.push(arg.to_string()),
                _ if arg.starts_with('-') && !is_number(arg) => {
                    log_warning_standalone!("Unknown argument: {}", arg);
                    unknown_arg_found = true;
                }
                _ => positionals.push(arg.to_string()),
            }
            idx += 1;
        }

        // Version takes precedence over help, help over errors
        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }
        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let action = match positionals.first().map(String::as_str) {
            None | Some("run") => {
                let rest = positionals.get(1..).unwrap_or_default();
                match (rest, samples.is_some()) {
                    ([], _) => CliAction::Run {
                        debug_enabled,
                        config_dir,
                        samples,
                        json_output,
                        log_file,
                    },
                    ([path], false) => CliAction::Run {
                        debug_enabled,
                        config_dir,
                        samples: Some(path.clone()),
                        json_output,
                        log_file,
                    },
                    _ => {
                        log_warning_standalone!("Usage: redzone run [--samples FILE|-]");
                        CliAction::ShowHelpDueToError
                    }
                }
            }
            Some("zones") | Some("z") => match parse_numbers(&positionals[1..]).as_deref() {
                Some(&[latitude, longitude]) => CliAction::ZonesCommand {
                    latitude,
                    longitude,
                },
                _ => {
                    log_warning_standalone!("Usage: redzone zones <latitude> <longitude>");
                    CliAction::ShowHelpDueToError
                }
            },
            Some("distance") => match parse_numbers(&positionals[1..]).as_deref() {
                Some(&[lat1, lon1, lat2, lon2]) => CliAction::DistanceCommand {
                    from: (lat1, lon1),
                    to: (lat2, lon2),
                },
                _ => {
                    log_warning_standalone!(
                        "Usage: redzone distance <lat1> <lon1> <lat2> <lon2>"
                    );
                    CliAction::ShowHelpDueToError
                }
            },
            // `run` is implied when a lone feed path is given
            Some(path) if positionals.len() == 1 && samples.is_none() => CliAction::Run {
                debug_enabled,
                config_dir,
                samples: Some(path.to_string()),
                json_output,
                log_file,
            },
            Some(unknown) => {
                log_warning_standalone!("Unknown command: {}", unknown);
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::logger::write_output(&format!("┗ {}\n", env!("CARGO_PKG_DESCRIPTION")));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("redzone [OPTIONS] [COMMAND | <file>]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Log the distance to every zone for each sample");
    log_indented!("-h, --help             Print help information");
    log_indented!("-j, --json             Emit side effects as JSON lines on stdout");
    log_indented!("-l, --log <file>       Write log output to a file");
    log_indented!("-s, --samples <file>   Read samples from a JSON-lines file (- for stdin)");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("run [<file>]                        Monitor a location feed (default)");
    log_indented!("zones, z <lat> <lon>                Show the red zones around an origin");
    log_indented!("distance <lat1> <lon1> <lat2> <lon2> Distance between two points in meters");
    log_end!();
}
