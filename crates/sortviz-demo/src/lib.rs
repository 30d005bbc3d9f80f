#![forbid(unsafe_code)]

//! Terminal front end for the sortviz engine.
//!
//! - [`cli`] - flags and `SORTVIZ_*` environment overrides
//! - [`app`] - UI state, key bindings and the engine worker thread
//! - [`bars`] - bar chart layout and drawing
//! - [`terminal`] - raw mode / alternate screen guard
//! - [`logging`] - file-backed tracing subscriber

pub mod app;
pub mod bars;
pub mod cli;
pub mod logging;
pub mod terminal;
