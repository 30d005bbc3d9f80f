#![forbid(unsafe_code)]

//! Operation counters and control enablement snapshots.

use std::fmt;

/// Snapshot of the operation counters of the current (or last) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RunStats {
    /// Comparisons performed (merge steps count once each).
    pub comparisons: u64,
    /// Swaps performed, including self-swaps.
    pub swaps: u64,
}

impl RunStats {
    /// Build a snapshot.
    pub const fn new(comparisons: u64, swaps: u64) -> Self {
        Self { comparisons, swaps }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comparisons={} swaps={}", self.comparisons, self.swaps)
    }
}

/// Which user actions are currently available.
///
/// Idle: generate and start enabled, stop disabled. Running: the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Controls {
    pub generate: bool,
    pub start: bool,
    pub stop: bool,
}

impl Controls {
    /// Controls while no run is active.
    pub const IDLE: Self = Self {
        generate: true,
        start: true,
        stop: false,
    };

    /// Controls while a run is active.
    pub const RUNNING: Self = Self {
        generate: false,
        start: false,
        stop: true,
    };

    /// Controls for the given running state.
    pub const fn for_running(running: bool) -> Self {
        if running { Self::RUNNING } else { Self::IDLE }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::IDLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_and_running_are_inverse() {
        assert_eq!(Controls::IDLE.generate, !Controls::RUNNING.generate);
        assert_eq!(Controls::IDLE.start, !Controls::RUNNING.start);
        assert_eq!(Controls::IDLE.stop, !Controls::RUNNING.stop);
        assert_eq!(Controls::default(), Controls::for_running(false));
    }

    #[test]
    fn stats_display() {
        assert_eq!(RunStats::new(6, 3).to_string(), "comparisons=6 swaps=3");
        assert_eq!(RunStats::default(), RunStats::new(0, 0));
    }
}
