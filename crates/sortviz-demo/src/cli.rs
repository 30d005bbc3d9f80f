#![forbid(unsafe_code)]

//! Command-line argument parsing for the visualizer.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `SORTVIZ_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

use sortviz_core::{AlgorithmId, Speed};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest sequence the front end generates.
pub const MIN_SIZE: usize = 5;

pub const HELP_TEXT: &str = "\
sortviz - step-by-step sorting algorithm visualizer

USAGE:
    sortviz [OPTIONS]

OPTIONS:
    --algorithm=ID       Algorithm to start with (default: bubble)
    --size=N             Number of bars, 5-200 (default: 50)
    --speed=N            Speed multiplier, > 0 (default: 5)
    --seed=N             Seed for generated values (default: from clock)
    --log=PATH           Write tracing output to PATH
    --autostart          Start sorting immediately
    --help, -h           Show this help message
    --version, -V        Show version

ALGORITHMS:
    1  bubble       Bubble Sort
    2  selection    Selection Sort
    3  insertion    Insertion Sort
    4  merge        Merge Sort
    5  quick        Quick Sort
    6  heap         Heap Sort

KEYBINDINGS:
    1-6, Left/Right  Select algorithm
    Enter / Space    Start sorting
    s / Esc          Stop
    g                Generate a new array
    + / -            Faster / slower
    ] / [            More / fewer bars
    q / Ctrl+C       Quit

ENVIRONMENT VARIABLES:
    SORTVIZ_ALGORITHM    Override --algorithm
    SORTVIZ_SIZE         Override --size
    SORTVIZ_SPEED        Override --speed
    SORTVIZ_SEED         Override --seed
    SORTVIZ_LOG          Override --log
    RUST_LOG             Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub algorithm: AlgorithmId,
    /// Requested bar count; clamped by the engine.
    pub size: usize,
    pub speed: Speed,
    pub seed: Option<u64>,
    /// Log file. Logging is off without one.
    pub log_path: Option<PathBuf>,
    pub autostart: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::default(),
            size: sortviz_core::config::DEFAULT_SIZE,
            speed: Speed::default(),
            seed: None,
            log_path: None,
            autostart: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Prints and exits for `--help`,
    /// `--version` and invalid flags.
    pub fn parse() -> Self {
        match parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Invocation::Run(opts)) => opts,
            Ok(Invocation::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Invocation::Version) => {
                println!("sortviz {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse from explicit sources.
///
/// Invalid environment values are ignored; invalid flags are errors.
pub fn parse_from<I, E>(args: I, env: E) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
    E: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    if let Some(val) = env("SORTVIZ_ALGORITHM")
        && let Ok(algo) = val.parse()
    {
        opts.algorithm = algo;
    }
    if let Some(val) = env("SORTVIZ_SIZE")
        && let Ok(n) = val.trim().parse()
    {
        opts.size = n;
    }
    if let Some(val) = env("SORTVIZ_SPEED")
        && let Some(speed) = parse_speed(&val)
    {
        opts.speed = speed;
    }
    if let Some(val) = env("SORTVIZ_SEED")
        && let Ok(n) = val.trim().parse()
    {
        opts.seed = Some(n);
    }
    if let Some(val) = env("SORTVIZ_LOG")
        && !val.is_empty()
    {
        opts.log_path = Some(PathBuf::from(val));
    }

    // Parse command-line args (override env vars)
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Invocation::Help),
            "--version" | "-V" => return Ok(Invocation::Version),
            "--autostart" => opts.autostart = true,
            other => {
                if let Some(val) = other.strip_prefix("--algorithm=") {
                    opts.algorithm = val
                        .parse()
                        .map_err(|e| format!("Invalid --algorithm value: {e}"))?;
                } else if let Some(val) = other.strip_prefix("--size=") {
                    opts.size = val
                        .parse()
                        .map_err(|_| format!("Invalid --size value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--speed=") {
                    opts.speed =
                        parse_speed(val).ok_or_else(|| format!("Invalid --speed value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--seed=") {
                    let seed = val
                        .parse()
                        .map_err(|_| format!("Invalid --seed value: {val}"))?;
                    opts.seed = Some(seed);
                } else if let Some(val) = other.strip_prefix("--log=") {
                    if val.is_empty() {
                        return Err("Invalid --log value: empty path".to_string());
                    }
                    opts.log_path = Some(PathBuf::from(val));
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Invocation::Run(opts))
}

fn parse_speed(val: &str) -> Option<Speed> {
    val.trim().parse::<f64>().ok().and_then(Speed::new)
}
