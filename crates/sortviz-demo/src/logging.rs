#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! The terminal is owned by the UI, so log output goes to a file or nowhere.
//! The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber writing to `path`.
///
/// Does nothing without a path.
///
/// # Errors
///
/// Fails if the file cannot be created or a global subscriber is already
/// installed.
pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(io::Error::other)?;
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
