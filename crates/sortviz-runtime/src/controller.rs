#![forbid(unsafe_code)]

//! The execution controller.
//!
//! [`Controller`] owns the sequence, the run lifecycle and the collaborators.
//! A run is synchronous: [`Controller::start`] returns only once the
//! algorithm finished (and the completion sweep played) or a stop was
//! observed at a suspend point. To interrupt from another thread, clone a
//! [`ControlHandle`] before starting.
//!
//! # Example
//!
//! ```
//! use sortviz_core::{AlgorithmId, EngineConfig};
//! use sortviz_runtime::{Controller, InstantDriver, NullRenderer, RunStatus};
//!
//! let mut controller =
//!     Controller::with_driver(NullRenderer, InstantDriver, EngineConfig::headless());
//! controller.load(vec![5, 3, 8, 1]);
//! let status = controller.start(AlgorithmId::Insertion).unwrap();
//! assert_eq!(status, RunStatus::Completed);
//! assert_eq!(controller.sequence().as_slice(), &[1, 3, 5, 8]);
//! assert_eq!(controller.stats().swaps, 4);
//! ```

use std::fmt;

use sortviz_core::{
    AlgorithmId, Controls, EngineConfig, HighlightSet, RunStats, SeededRng, Sequence, Speed,
};

use crate::algorithms;
use crate::driver::{Driver, SleepDriver};
use crate::error::StartError;
use crate::handle::ControlHandle;
use crate::render::{Renderer, Status};
use crate::session::Session;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The algorithm finished and the sorted sweep played.
    Completed,
    /// A stop was observed before the end.
    Stopped,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Stopped => f.write_str("stopped"),
        }
    }
}

/// Runs sorting algorithms step by step against a renderer.
pub struct Controller<R: Renderer, D: Driver = SleepDriver> {
    config: EngineConfig,
    sequence: Sequence,
    rng: SeededRng,
    handle: ControlHandle,
    renderer: R,
    driver: D,
    last_algorithm: Option<AlgorithmId>,
}

impl<R: Renderer> Controller<R, SleepDriver> {
    /// Real-time controller with the default configuration.
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, EngineConfig::default())
    }

    /// Real-time controller with a custom configuration.
    pub fn with_config(renderer: R, config: EngineConfig) -> Self {
        Self::with_driver(renderer, SleepDriver, config)
    }
}

impl<R: Renderer, D: Driver> Controller<R, D> {
    /// Controller with an explicit driver.
    ///
    /// A random sequence of `config.initial_size` is generated and shown
    /// immediately.
    pub fn with_driver(renderer: R, driver: D, config: EngineConfig) -> Self {
        let mut rng = config.rng();
        let size = config.clamp_size(config.initial_size);
        let sequence = Sequence::random(size, config.value_range.clone(), &mut rng);
        let handle = ControlHandle::new(config.initial_speed);
        let mut controller = Self {
            config,
            sequence,
            rng,
            handle,
            renderer,
            driver,
            last_algorithm: None,
        };
        controller.show_fresh_sequence();
        controller
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Replace the sequence with `size` random magnitudes.
    ///
    /// The size is clamped to the configured bounds. Returns `false` and
    /// changes nothing while a run is active.
    pub fn generate(&mut self, size: usize) -> bool {
        if self.handle.is_running() {
            tracing::debug!(size, "generate ignored while running");
            return false;
        }
        let size = self.config.clamp_size(size);
        self.sequence = Sequence::random(size, self.config.value_range.clone(), &mut self.rng);
        tracing::debug!(size, "sequence generated");
        self.show_fresh_sequence();
        true
    }

    /// Replace the sequence with explicit values.
    ///
    /// Returns `false` and changes nothing while a run is active.
    pub fn load(&mut self, values: impl Into<Vec<u32>>) -> bool {
        if self.handle.is_running() {
            tracing::debug!("load ignored while running");
            return false;
        }
        self.sequence = Sequence::new(values.into());
        tracing::debug!(size = self.sequence.len(), "sequence loaded");
        self.show_fresh_sequence();
        true
    }

    /// Run `algorithm` on the current sequence until it finishes or is
    /// stopped.
    ///
    /// # Errors
    ///
    /// [`StartError::AlreadyRunning`] if a run is active on this controller's
    /// signal.
    pub fn start(&mut self, algorithm: AlgorithmId) -> Result<RunStatus, StartError> {
        if !self.handle.signal.begin() {
            tracing::warn!(%algorithm, "start rejected: already running");
            return Err(StartError::AlreadyRunning);
        }
        self.handle.counters.reset();
        self.last_algorithm = Some(algorithm);

        let span = tracing::info_span!("run", %algorithm, size = self.sequence.len());
        let _enter = span.enter();
        tracing::info!("run started");
        self.renderer.status(&Status::Sorting(algorithm));

        let outcome = {
            let mut session = Session::new(
                self.sequence.as_mut_slice(),
                &self.handle.counters,
                &self.handle.signal,
                &self.handle.speed,
                self.config.pacing(),
                &mut self.driver,
                &mut self.renderer,
            );
            algorithms::run(algorithm, &mut session).and_then(|()| session.sweep_sorted())
        };
        self.handle.signal.stop();

        let status = match outcome {
            Ok(()) => {
                self.renderer.status(&Status::Completed(algorithm));
                RunStatus::Completed
            }
            Err(_) => {
                self.renderer.clear_highlights();
                self.renderer.status(&Status::Stopped(algorithm));
                RunStatus::Stopped
            }
        };
        let stats = self.handle.stats();
        tracing::info!(
            %status,
            comparisons = stats.comparisons,
            swaps = stats.swaps,
            "run finished"
        );
        Ok(status)
    }

    /// [`start`](Self::start) with an algorithm id such as `"merge"`.
    ///
    /// # Errors
    ///
    /// [`StartError::UnknownAlgorithm`] for an unrecognized id, before any
    /// state changes; otherwise as [`start`](Self::start).
    pub fn start_named(&mut self, id: &str) -> Result<RunStatus, StartError> {
        let algorithm = id.parse::<AlgorithmId>()?;
        self.start(algorithm)
    }

    /// Stop the active run, if any, and clear all highlights.
    ///
    /// See [`ControlHandle::stop`] for when a run still completes.
    pub fn stop(&mut self) {
        self.handle.stop();
        self.renderer.clear_highlights();
    }

    /// Change the speed multiplier. See [`ControlHandle::set_speed`].
    pub fn set_speed(&mut self, multiplier: f64) -> bool {
        self.handle.set_speed(multiplier)
    }

    fn show_fresh_sequence(&mut self) {
        self.handle.counters.reset();
        self.renderer
            .render(self.sequence.as_slice(), &HighlightSet::none());
        self.renderer.status(&Status::Generated {
            size: self.sequence.len(),
        });
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// A cloneable handle for stopping the run or changing speed from
    /// another thread.
    pub fn handle(&self) -> ControlHandle {
        self.handle.clone()
    }

    /// Current speed.
    pub fn speed(&self) -> Speed {
        self.handle.speed()
    }

    /// The sequence as it currently stands.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Counters of the current (or last) run.
    pub fn stats(&self) -> RunStats {
        self.handle.stats()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn controls(&self) -> Controls {
        self.handle.controls()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Algorithm of the most recent run.
    pub fn last_algorithm(&self) -> Option<AlgorithmId> {
        self.last_algorithm
    }
}

impl<R: Renderer + fmt::Debug, D: Driver + fmt::Debug> fmt::Debug for Controller<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("sequence", &self.sequence)
            .field("handle", &self.handle)
            .field("renderer", &self.renderer)
            .field("driver", &self.driver)
            .field("last_algorithm", &self.last_algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{InstantDriver, RecordingDriver};
    use crate::render::RecordingRenderer;
    use sortviz_core::Highlight;
    use sortviz_core::pacing::MAX_DELAY;

    fn headless(values: &[u32]) -> Controller<RecordingRenderer, RecordingDriver> {
        let mut c = Controller::with_driver(
            RecordingRenderer::new(),
            RecordingDriver::new(),
            EngineConfig::headless(),
        );
        c.load(values.to_vec());
        c
    }

    #[test]
    fn construction_generates_initial_sequence() {
        let c = Controller::with_driver(
            RecordingRenderer::new(),
            InstantDriver,
            EngineConfig::headless().with_initial_size(12),
        );
        assert_eq!(c.sequence().len(), 12);
        assert!(c.sequence().as_slice().iter().all(|v| (10..310).contains(v)));
        assert_eq!(
            c.renderer().last_status(),
            Some(&Status::Generated { size: 12 })
        );
        assert_eq!(c.controls(), Controls::IDLE);
    }

    #[test]
    fn completed_run_reports_and_keeps_sorted_marks() {
        let mut c = headless(&[3, 1, 2]);
        assert_eq!(c.start(AlgorithmId::Bubble), Ok(RunStatus::Completed));
        assert_eq!(c.sequence().as_slice(), &[1, 2, 3]);
        let statuses = c.renderer().statuses();
        assert_eq!(
            &statuses[statuses.len() - 2..],
            &[
                Status::Sorting(AlgorithmId::Bubble),
                Status::Completed(AlgorithmId::Bubble)
            ]
        );
        assert_eq!(
            c.renderer().current_highlights(),
            &HighlightSet::sorted_through(2)
        );
        assert!(!c.is_running());
        assert_eq!(c.last_algorithm(), Some(AlgorithmId::Bubble));
    }

    #[test]
    fn sweep_follows_the_algorithm() {
        let mut c = headless(&[2, 1]);
        c.start(AlgorithmId::Selection).unwrap();
        let steps: Vec<_> = c.driver().trace().steps().collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[2].name(), "sorted");
        assert_eq!(steps[3].highlights().state_of(0), Some(Highlight::Sorted));
    }

    #[test]
    fn stopped_run_clears_highlights() {
        let mut c = headless(&[4, 3, 2, 1]);
        // Now sorted: compare, sorted(0), sorted(1). Stop one pause earlier.
        c.driver_mut().clear();
        c.driver_mut().set_stop_after(Some(2));
        assert_eq!(c.start(AlgorithmId::Bubble), Ok(RunStatus::Stopped));
        assert!(c.renderer().current_highlights().is_empty());
        assert_eq!(
            c.renderer().last_status(),
            Some(&Status::Stopped(AlgorithmId::Bubble))
        );
        assert_eq!(c.controls(), Controls::IDLE);
    }

    #[test]
    fn counters_reset_on_start_and_load() {
        let mut c = headless(&[2, 1]);
        c.start(AlgorithmId::Bubble).unwrap();
        assert_eq!(c.stats(), RunStats::new(1, 1));
        c.start(AlgorithmId::Bubble).unwrap();
        assert_eq!(c.stats(), RunStats::new(1, 0));
        c.load(vec![1]);
        assert_eq!(c.stats(), RunStats::default());
    }

    #[test]
    fn start_named_rejects_unknown_id_without_side_effects() {
        let mut c = headless(&[2, 1]);
        let renders = c.renderer().render_calls();
        let err = c.start_named("bogo").unwrap_err();
        assert!(matches!(err, StartError::UnknownAlgorithm(ref e) if e.id() == "bogo"));
        assert_eq!(c.renderer().render_calls(), renders);
        assert_eq!(c.sequence().as_slice(), &[2, 1]);
        assert_eq!(c.start_named("Quick"), Ok(RunStatus::Completed));
    }

    #[test]
    fn start_rejected_while_signal_running() {
        let mut c = headless(&[2, 1]);
        assert!(c.handle.signal.begin());
        assert_eq!(c.start(AlgorithmId::Heap), Err(StartError::AlreadyRunning));
        assert!(!c.generate(10));
        assert!(!c.load(vec![1, 2, 3]));
        assert_eq!(c.sequence().as_slice(), &[2, 1]);
    }

    #[test]
    fn stop_while_idle_only_clears_highlights() {
        let mut c = headless(&[1, 2]);
        let before = c.sequence().clone();
        c.stop();
        c.stop();
        assert_eq!(c.renderer().clears(), 2);
        assert_eq!(c.sequence(), &before);
        assert!(!c.is_running());
    }

    #[test]
    fn generate_clamps_to_bounds() {
        let mut c = Controller::with_driver(
            RecordingRenderer::counting(),
            InstantDriver,
            EngineConfig::headless().with_size_bounds(5..=20),
        );
        assert!(c.generate(1));
        assert_eq!(c.sequence().len(), 5);
        assert!(c.generate(500));
        assert_eq!(c.sequence().len(), 20);
    }

    #[test]
    fn set_speed_validates() {
        let mut c = headless(&[1]);
        assert!(c.set_speed(12.0));
        assert_eq!(c.speed().get(), 12.0);
        assert!(!c.set_speed(f64::NAN));
        assert_eq!(c.speed().get(), 12.0);
    }

    #[test]
    fn tiny_speed_runs_with_capped_pauses() {
        let mut c = Controller::with_driver(
            RecordingRenderer::counting(),
            RecordingDriver::new(),
            EngineConfig::default().with_seed(0),
        );
        c.load(vec![2, 1]);
        assert!(c.set_speed(1e-300));
        assert_eq!(c.start(AlgorithmId::Bubble), Ok(RunStatus::Completed));
        let trace = c.driver().trace();
        assert_eq!(trace.len(), 4);
        assert!(trace.entries().iter().all(|e| e.delay == MAX_DELAY));
    }

    #[test]
    fn stop_during_last_sweep_pause_still_completes() {
        let mut c = headless(&[2, 1]);
        // compare, swap, sorted(0), sorted(1)
        c.driver_mut().set_stop_after(Some(4));
        assert_eq!(c.start(AlgorithmId::Bubble), Ok(RunStatus::Completed));
        assert_eq!(
            c.renderer().current_highlights(),
            &HighlightSet::sorted_through(1)
        );
        assert_eq!(c.renderer().clears(), 0);
        assert!(!c.is_running());

        // Now sorted: compare, sorted(0), sorted(1). Stop one pause earlier.
        c.driver_mut().clear();
        c.driver_mut().set_stop_after(Some(2));
        assert_eq!(c.start(AlgorithmId::Bubble), Ok(RunStatus::Stopped));
    }
}
