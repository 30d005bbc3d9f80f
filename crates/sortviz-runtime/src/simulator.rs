#![forbid(unsafe_code)]

//! Deterministic run simulator for testing.
//!
//! `RunSimulator` drives a [`Controller`] with a [`RecordingRenderer`] and a
//! [`RecordingDriver`]: no terminal, no sleeping. Every frame, status and
//! suspend point is captured, and delays are still computed from the real
//! pacing so speed behavior can be asserted without waiting.
//!
//! # Example
//!
//! ```
//! use sortviz_core::AlgorithmId;
//! use sortviz_runtime::{RunSimulator, RunStatus};
//!
//! let mut sim = RunSimulator::new(vec![4, 2, 3, 1]);
//! assert_eq!(sim.run(AlgorithmId::Heap).unwrap(), RunStatus::Completed);
//! assert_eq!(sim.values(), &[1, 2, 3, 4]);
//! assert_eq!(sim.trace().count("sorted"), 4);
//! ```

use sortviz_core::{AlgorithmId, EngineConfig, RunStats, Speed};

use crate::controller::{Controller, RunStatus};
use crate::driver::RecordingDriver;
use crate::error::StartError;
use crate::render::{RecordingRenderer, RenderedFrame, Status};
use crate::trace::StepTrace;

/// Headless controller with full recording.
#[derive(Debug)]
pub struct RunSimulator {
    controller: Controller<RecordingRenderer, RecordingDriver>,
}

impl RunSimulator {
    /// Simulator over explicit values.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut sim = Self::with_config(EngineConfig::default().with_seed(0));
        sim.controller.load(values);
        sim.reset_recordings();
        sim
    }

    /// Simulator over `size` random values from `seed`.
    pub fn random(size: usize, seed: u64) -> Self {
        let config = EngineConfig::default()
            .with_seed(seed)
            .with_initial_size(size);
        let mut sim = Self::with_config(config);
        sim.reset_recordings();
        sim
    }

    /// Simulator with a custom configuration. Its initial random sequence
    /// and `Generated` status stay recorded.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            controller: Controller::with_driver(
                RecordingRenderer::new(),
                RecordingDriver::new(),
                config,
            ),
        }
    }

    /// Stop every following run after `steps` suspend points.
    #[must_use]
    pub fn stop_after(mut self, steps: usize) -> Self {
        self.controller.driver_mut().set_stop_after(Some(steps));
        self
    }

    /// Set the speed for following runs.
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.controller.set_speed(speed.get());
        self
    }

    /// Run `algorithm` on the current values.
    pub fn run(&mut self, algorithm: AlgorithmId) -> Result<RunStatus, StartError> {
        self.controller.start(algorithm)
    }

    /// Current values.
    pub fn values(&self) -> &[u32] {
        self.controller.sequence().as_slice()
    }

    /// Counters of the last run.
    pub fn stats(&self) -> RunStats {
        self.controller.stats()
    }

    /// Suspend points recorded since the last reset.
    pub fn trace(&self) -> &StepTrace {
        self.controller.driver().trace()
    }

    /// Frames rendered since the last reset.
    pub fn frames(&self) -> &[RenderedFrame] {
        self.controller.renderer().frames()
    }

    /// Statuses reported since the last reset.
    pub fn statuses(&self) -> &[Status] {
        self.controller.renderer().statuses()
    }

    pub fn controller(&self) -> &Controller<RecordingRenderer, RecordingDriver> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<RecordingRenderer, RecordingDriver> {
        &mut self.controller
    }

    /// Forget recorded frames, statuses and steps.
    pub fn reset_recordings(&mut self) {
        self.controller.renderer_mut().reset();
        self.controller.driver_mut().clear();
    }
}
