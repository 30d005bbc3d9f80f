#![forbid(unsafe_code)]

//! Instrumented primitives.
//!
//! A [`Session`] is the only view of the sequence an algorithm gets. Each
//! primitive is one suspend point: check the running flag, render, pause
//! through the driver, then perform the operation and count it. Algorithms
//! see nothing but indices and the boolean result of [`Session::compare`].

use std::ops::Range;

use sortviz_core::{Highlight, HighlightSet, Pacing};

use crate::driver::{Driver, Step};
use crate::error::Cancelled;
use crate::handle::{Counters, SpeedControl};
use crate::render::Renderer;
use crate::signal::RunSignal;

/// One run's access to the sequence and its collaborators.
pub struct Session<'a> {
    values: &'a mut [u32],
    counters: &'a Counters,
    signal: &'a RunSignal,
    speed: &'a SpeedControl,
    pacing: Pacing,
    driver: &'a mut dyn Driver,
    renderer: &'a mut dyn Renderer,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        values: &'a mut [u32],
        counters: &'a Counters,
        signal: &'a RunSignal,
        speed: &'a SpeedControl,
        pacing: Pacing,
        driver: &'a mut dyn Driver,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            values,
            counters,
            signal,
            speed,
            pacing,
            driver,
            renderer,
        }
    }

    /// Sequence length. Fixed for the whole run.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `sequence[i] > sequence[j]`.
    ///
    /// The single comparison law: callers needing `<` or `>=` swap the
    /// arguments or negate the result.
    pub fn compare(&mut self, i: usize, j: usize) -> Result<bool, Cancelled> {
        self.suspend(Step::Compare { a: i, b: j })?;
        self.counters.add_comparison();
        Ok(self.values[i] > self.values[j])
    }

    /// Exchange `sequence[i]` and `sequence[j]`. `i == j` is allowed and
    /// still counted.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), Cancelled> {
        self.suspend(Step::Swap { a: i, b: j })?;
        self.values.swap(i, j);
        self.counters.add_swap();
        self.renderer
            .render(self.values, &HighlightSet::pair(Highlight::Swapping, i, j));
        Ok(())
    }

    /// Pause on a single highlighted index without touching the data.
    pub fn highlight(&mut self, tag: Highlight, index: usize) -> Result<(), Cancelled> {
        self.suspend(Step::Mark { index, tag })
    }

    /// Copy of `sequence[range]` for merge sort's two halves.
    pub(crate) fn snapshot(&self, range: Range<usize>) -> Vec<u32> {
        self.values[range].to_vec()
    }

    /// Merge sort's write-back of one cell. `counted` charges one comparison.
    pub(crate) fn write(
        &mut self,
        index: usize,
        value: u32,
        counted: bool,
    ) -> Result<(), Cancelled> {
        let step = Step::Write { index, counted };
        self.suspend(step)?;
        if counted {
            self.counters.add_comparison();
        }
        self.values[index] = value;
        self.renderer.render(self.values, &step.highlights());
        Ok(())
    }

    /// Copy `values` into `sequence[start..]` without pausing or counting.
    ///
    /// Used when a merge is cancelled halfway, so the cells not yet written
    /// get their original contents back and the sequence stays a
    /// permutation of its pre-run values.
    pub(crate) fn restore(&mut self, start: usize, values: &[u32]) {
        self.values[start..start + values.len()].copy_from_slice(values);
        self.renderer.render(self.values, &HighlightSet::none());
    }

    /// Mark every index sorted, left to right, one pause each.
    pub(crate) fn sweep_sorted(&mut self) -> Result<(), Cancelled> {
        for index in 0..self.len() {
            self.suspend(Step::Sorted { index })?;
        }
        Ok(())
    }

    fn suspend(&mut self, step: Step) -> Result<(), Cancelled> {
        if !self.signal.is_running() {
            tracing::trace!(%step, "suspend point observed stop");
            return Err(Cancelled);
        }
        self.renderer.render(self.values, &step.highlights());
        let delay = self.pacing.delay(self.speed.get(), step.pause_kind());
        tracing::trace!(%step, delay_us = delay.as_micros() as u64, "suspend");
        self.driver.suspend(&step, delay, self.signal);
        Ok(())
    }
}
