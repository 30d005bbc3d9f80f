#![forbid(unsafe_code)]

//! Thread-safe view of a controller's live state.
//!
//! A [`ControlHandle`] is what a UI thread keeps while the engine runs on
//! another thread: it can stop the run, change the speed, and read the
//! counters and control enablement. It never touches the sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sortviz_core::{Controls, RunStats, Speed};

use crate::signal::RunSignal;

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Operation counters, readable from any thread during a run.
#[derive(Debug, Default)]
pub struct Counters {
    comparisons: AtomicU64,
    swaps: AtomicU64,
}

impl Counters {
    pub(crate) fn reset(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
        self.swaps.store(0, Ordering::Relaxed);
    }

    pub(crate) fn add_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_swap(&self) {
        self.swaps.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values.
    pub fn snapshot(&self) -> RunStats {
        RunStats::new(
            self.comparisons.load(Ordering::Relaxed),
            self.swaps.load(Ordering::Relaxed),
        )
    }
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Live-adjustable speed, stored as `f64` bits.
#[derive(Debug, Clone)]
pub struct SpeedControl {
    bits: Arc<AtomicU64>,
}

impl SpeedControl {
    /// Shared speed starting at `speed`.
    pub fn new(speed: Speed) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(speed.get().to_bits())),
        }
    }

    /// Current speed.
    pub fn get(&self) -> Speed {
        Speed::new(f64::from_bits(self.bits.load(Ordering::Acquire))).unwrap_or_default()
    }

    /// Replace the speed. Applies from the next suspend point on.
    pub fn set(&self, speed: Speed) {
        self.bits.store(speed.get().to_bits(), Ordering::Release);
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new(Speed::default())
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Cloneable handle onto a controller's running flag, speed and counters.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    pub(crate) signal: RunSignal,
    pub(crate) speed: SpeedControl,
    pub(crate) counters: Arc<Counters>,
}

impl ControlHandle {
    pub(crate) fn new(speed: Speed) -> Self {
        Self {
            signal: RunSignal::new(),
            speed: SpeedControl::new(speed),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Request the active run to stop.
    ///
    /// The run observes the request at its next suspend point. Returns
    /// whether a run was active; calling it while idle changes nothing.
    ///
    /// A stop landing during the last pause of the completion sweep has no
    /// later suspend point to observe it: the run reports
    /// [`RunStatus::Completed`](crate::RunStatus::Completed) and its sorted
    /// marks stay. This handle never clears highlights itself; the run does
    /// that when it ends as stopped.
    pub fn stop(&self) -> bool {
        let was_running = self.signal.stop();
        tracing::debug!(was_running, "stop requested");
        was_running
    }

    /// Change the speed multiplier.
    ///
    /// Returns `false` and keeps the current speed for non-positive or
    /// non-finite values.
    pub fn set_speed(&self, multiplier: f64) -> bool {
        match Speed::new(multiplier) {
            Some(speed) => {
                self.speed.set(speed);
                tracing::debug!(speed = multiplier, "speed changed");
                true
            }
            None => {
                tracing::warn!(speed = multiplier, "rejected invalid speed");
                false
            }
        }
    }

    /// Current speed.
    pub fn speed(&self) -> Speed {
        self.speed.get()
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        self.signal.is_running()
    }

    /// Which actions are currently enabled.
    pub fn controls(&self) -> Controls {
        self.signal.controls()
    }

    /// Counter snapshot.
    pub fn stats(&self) -> RunStats {
        self.counters.snapshot()
    }

    /// The underlying running flag.
    pub fn signal(&self) -> &RunSignal {
        &self.signal
    }
}
