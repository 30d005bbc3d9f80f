#![forbid(unsafe_code)]

//! Core: the data model shared by the sortviz engine and its front ends.
//!
//! - [`sequence`] - the array being sorted, plus deterministic generation
//! - [`highlight`] - transient per-index render tags
//! - [`algorithm`] - the closed set of supported algorithms and their info
//! - [`pacing`] - speed and pause-duration computation
//! - [`stats`] - operation counter snapshots and control enablement
//! - [`config`] - engine configuration

pub mod algorithm;
pub mod config;
pub mod highlight;
pub mod logging;
pub mod pacing;
pub mod sequence;
pub mod stats;

pub use algorithm::{AlgorithmId, AlgorithmInfo, ParseAlgorithmError};
pub use config::EngineConfig;
pub use highlight::{Highlight, HighlightSet};
pub use pacing::{Pacing, PauseKind, Speed};
pub use sequence::{SeededRng, Sequence};
pub use stats::{Controls, RunStats};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
