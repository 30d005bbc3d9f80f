#![forbid(unsafe_code)]

//! Speed and pause-duration computation.
//!
//! Every suspend point pauses for `base_delay * weight(kind) / speed`. Speed
//! is read at each suspend point, so a change takes effect on the next pause
//! and never retroactively.

use std::fmt;
use std::time::Duration;

/// Speed used when nothing else is configured.
pub const DEFAULT_SPEED: f64 = 5.0;

/// Pause at speed 1.0 for a full-weight step.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Longest single pause. Tiny speeds saturate here.
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Positive, finite speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    /// Validate a multiplier. Rejects zero, negatives, NaN and infinities.
    pub fn new(multiplier: f64) -> Option<Self> {
        (multiplier.is_finite() && multiplier > 0.0).then_some(Self(multiplier))
    }

    /// The raw multiplier.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(DEFAULT_SPEED)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// What a suspend point is pausing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseKind {
    /// Compare, swap, pivot and focus highlights.
    Highlight,
    /// One cell written back by merge sort.
    MergeWrite,
    /// One index of the completion sweep.
    SortedSweep,
}

impl PauseKind {
    /// Relative pause length.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Highlight => 1.0,
            Self::MergeWrite => 0.5,
            Self::SortedSweep => 0.2,
        }
    }
}

/// Converts a speed and a pause kind into a concrete duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    base_delay: Duration,
}

impl Pacing {
    /// Pacing with the given full-weight pause at speed 1.0.
    pub const fn new(base_delay: Duration) -> Self {
        Self { base_delay }
    }

    /// Pacing that never pauses.
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Full-weight pause at speed 1.0.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Pause for one suspend point, at most [`MAX_DELAY`].
    pub fn delay(&self, speed: Speed, kind: PauseKind) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let secs = self.base_delay.as_secs_f64() * (kind.weight() / speed.get());
        Duration::try_from_secs_f64(secs).map_or(MAX_DELAY, |delay| delay.min(MAX_DELAY))
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY)
    }
}
