#![forbid(unsafe_code)]

//! Runtime: the animated, interruptible sorting engine.
//!
//! An algorithm never touches the sequence directly. It calls the
//! instrumented primitives on a [`Session`], each of which is a suspend
//! point: the cancellation flag is checked, the renderer is shown the
//! step's highlights, and a [`Driver`] pauses for a delay derived from the
//! live speed.
//!
//! # Modules
//!
//! - [`controller`] - run lifecycle: generate, start, stop, speed
//! - [`session`] - `compare`, `swap` and the other suspend points
//! - [`algorithms`] - bubble, selection, insertion, merge, quick, heap
//! - [`driver`] - how a suspend point pauses (sleep, instant, record)
//! - [`render`] - the renderer collaborator interface
//! - [`handle`] - cross-thread stop/speed/counter access
//! - [`simulator`] - headless recording runs for tests

pub mod algorithms;
pub mod controller;
pub mod driver;
pub mod error;
pub mod handle;
pub mod render;
pub mod session;
pub mod signal;
pub mod simulator;
pub mod trace;

pub use controller::{Controller, RunStatus};
pub use driver::{Driver, InstantDriver, RecordingDriver, SleepDriver, Step};
pub use error::{Cancelled, StartError};
pub use handle::{ControlHandle, Counters, SpeedControl};
pub use render::{NullRenderer, RecordingRenderer, RenderedFrame, Renderer, Status};
pub use session::Session;
pub use signal::RunSignal;
pub use simulator::RunSimulator;
pub use trace::StepTrace;
