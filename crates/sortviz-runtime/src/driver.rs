#![forbid(unsafe_code)]

//! Suspend-point scheduling.
//!
//! Every instrumented primitive describes the pause it wants as a [`Step`]
//! and hands it, with the delay computed from the current speed, to a
//! [`Driver`]. The driver decides what "pausing" means:
//!
//! - [`SleepDriver`] waits on the run signal (real time, interruptible)
//! - [`InstantDriver`] returns immediately (headless runs)
//! - [`RecordingDriver`] records every step into a [`StepTrace`] and can
//!   stop the run after a given number of steps
//! - [`from_fn`] adapts a closure
//!
//! Cancellation is checked by the session *before* the driver is called, so
//! drivers never need to report it.

use std::fmt;
use std::time::Duration;

use sortviz_core::{Highlight, HighlightSet, PauseKind};

use crate::signal::RunSignal;
use crate::trace::StepTrace;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// What a suspend point is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `compare(a, b)`.
    Compare { a: usize, b: usize },
    /// `swap(a, b)`.
    Swap { a: usize, b: usize },
    /// A pure highlight with no data access (pivot marker, insertion focus).
    Mark { index: usize, tag: Highlight },
    /// Merge sort writing one cell; `counted` when it cost a comparison.
    Write { index: usize, counted: bool },
    /// Completion sweep reaching `index`.
    Sorted { index: usize },
}

impl Step {
    /// Pause weighting for this step.
    pub fn pause_kind(&self) -> PauseKind {
        match self {
            Self::Compare { .. } | Self::Swap { .. } | Self::Mark { .. } => PauseKind::Highlight,
            Self::Write { .. } => PauseKind::MergeWrite,
            Self::Sorted { .. } => PauseKind::SortedSweep,
        }
    }

    /// Highlights rendered while paused on this step.
    pub fn highlights(&self) -> HighlightSet {
        match *self {
            Self::Compare { a, b } => HighlightSet::pair(Highlight::Comparing, a, b),
            Self::Swap { a, b } => HighlightSet::pair(Highlight::Swapping, a, b),
            Self::Mark { index, tag } => HighlightSet::single(tag, index),
            Self::Write { index, counted: true } => {
                HighlightSet::single(Highlight::Comparing, index)
            }
            Self::Write { counted: false, .. } => HighlightSet::none(),
            Self::Sorted { index } => HighlightSet::sorted_through(index),
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compare { .. } => "compare",
            Self::Swap { .. } => "swap",
            Self::Mark { .. } => "mark",
            Self::Write { .. } => "write",
            Self::Sorted { .. } => "sorted",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { a, b } => write!(f, "compare({a}, {b})"),
            Self::Swap { a, b } => write!(f, "swap({a}, {b})"),
            Self::Mark { index, tag } => write!(f, "mark({index}, {tag})"),
            Self::Write { index, counted } => write!(f, "write({index}, counted={counted})"),
            Self::Sorted { index } => write!(f, "sorted({index})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Executes suspend points.
pub trait Driver {
    /// Pause for `step`. `delay` was computed from the speed at this very
    /// suspend point. The driver may stop the run through `signal`; the stop
    /// is observed at the next suspend point.
    fn suspend(&mut self, step: &Step, delay: Duration, signal: &RunSignal);
}

impl<D: Driver + ?Sized> Driver for &mut D {
    fn suspend(&mut self, step: &Step, delay: Duration, signal: &RunSignal) {
        (**self).suspend(step, delay, signal);
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn suspend(&mut self, step: &Step, delay: Duration, signal: &RunSignal) {
        (**self).suspend(step, delay, signal);
    }
}

/// Real-time driver: waits out the delay, waking early on stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepDriver;

impl Driver for SleepDriver {
    fn suspend(&mut self, _step: &Step, delay: Duration, signal: &RunSignal) {
        signal.wait_timeout(delay);
    }
}

/// Zero-delay driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDriver;

impl Driver for InstantDriver {
    fn suspend(&mut self, _step: &Step, _delay: Duration, _signal: &RunSignal) {}
}

/// Zero-delay driver that records every step.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    trace: StepTrace,
    stop_after: Option<usize>,
}

impl RecordingDriver {
    /// Record without ever stopping the run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the run once `steps` suspend points have been executed.
    ///
    /// The stop lands after the pause of step `steps`, so that step's
    /// operation still completes and the run cancels at the next one.
    #[must_use]
    pub fn stop_after(mut self, steps: usize) -> Self {
        self.stop_after = Some(steps);
        self
    }

    /// Change or clear the stop point.
    pub fn set_stop_after(&mut self, steps: Option<usize>) {
        self.stop_after = steps;
    }

    /// Recorded steps.
    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }

    /// Forget recorded steps.
    pub fn clear(&mut self) {
        self.trace.clear();
    }
}

impl Driver for RecordingDriver {
    fn suspend(&mut self, step: &Step, delay: Duration, signal: &RunSignal) {
        self.trace.record(*step, delay);
        if self.stop_after == Some(self.trace.len()) {
            tracing::debug!(steps = self.trace.len(), "recording driver stopping run");
            signal.stop();
        }
    }
}

/// Driver backed by a closure. See [`from_fn`].
pub struct FnDriver<F>(F);

impl<F> fmt::Debug for FnDriver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDriver")
    }
}

impl<F: FnMut(&Step, Duration, &RunSignal)> Driver for FnDriver<F> {
    fn suspend(&mut self, step: &Step, delay: Duration, signal: &RunSignal) {
        (self.0)(step, delay, signal);
    }
}

/// Build a driver from a closure.
///
/// ```
/// use sortviz_runtime::RunSignal;
/// use sortviz_runtime::driver::{self, Driver, Step};
/// use std::time::Duration;
///
/// let mut count = 0;
/// let mut counting = driver::from_fn(|_step, _delay, _signal| count += 1);
/// counting.suspend(&Step::Sorted { index: 0 }, Duration::ZERO, &RunSignal::new());
/// drop(counting);
/// assert_eq!(count, 1);
/// ```
pub fn from_fn<F: FnMut(&Step, Duration, &RunSignal)>(f: F) -> FnDriver<F> {
    FnDriver(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_highlights_follow_kind() {
        assert_eq!(
            Step::Compare { a: 1, b: 2 }.highlights(),
            HighlightSet::pair(Highlight::Comparing, 1, 2)
        );
        assert_eq!(
            Step::Swap { a: 0, b: 3 }.highlights().tag(),
            Some(Highlight::Swapping)
        );
        assert_eq!(
            Step::Mark { index: 4, tag: Highlight::Pivot }.highlights(),
            HighlightSet::single(Highlight::Pivot, 4)
        );
        assert!(Step::Write { index: 2, counted: false }.highlights().is_empty());
        assert_eq!(Step::Sorted { index: 2 }.highlights().indices(), &[0, 1, 2]);
    }

    #[test]
    fn step_pause_kinds() {
        assert_eq!(Step::Compare { a: 0, b: 1 }.pause_kind(), PauseKind::Highlight);
        assert_eq!(
            Step::Write { index: 0, counted: true }.pause_kind(),
            PauseKind::MergeWrite
        );
        assert_eq!(Step::Sorted { index: 0 }.pause_kind(), PauseKind::SortedSweep);
    }

    #[test]
    fn recording_driver_stops_at_threshold() {
        let signal = RunSignal::new();
        signal.begin();
        let mut driver = RecordingDriver::new().stop_after(2);
        let step = Step::Compare { a: 0, b: 1 };

        driver.suspend(&step, Duration::ZERO, &signal);
        assert!(signal.is_running());
        driver.suspend(&step, Duration::ZERO, &signal);
        assert!(!signal.is_running());
        assert_eq!(driver.trace().len(), 2);
    }

    #[test]
    fn fn_driver_invokes_closure() {
        let signal = RunSignal::new();
        let mut seen = Vec::new();
        {
            let mut driver = from_fn(|step: &Step, _: Duration, _: &RunSignal| seen.push(*step));
            driver.suspend(&Step::Sorted { index: 0 }, Duration::ZERO, &signal);
            driver.suspend(&Step::Sorted { index: 1 }, Duration::ZERO, &signal);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn sleep_driver_returns_early_when_idle() {
        let signal = RunSignal::new();
        let start = std::time::Instant::now();
        SleepDriver.suspend(&Step::Sorted { index: 0 }, Duration::from_secs(5), &signal);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn step_display() {
        assert_eq!(Step::Swap { a: 1, b: 4 }.to_string(), "swap(1, 4)");
        assert_eq!(
            Step::Mark { index: 3, tag: Highlight::Pivot }.to_string(),
            "mark(3, pivot)"
        );
    }
}
