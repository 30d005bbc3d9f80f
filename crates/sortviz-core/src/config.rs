#![forbid(unsafe_code)]

//! Engine configuration.

use std::ops::{Range, RangeInclusive};
use std::time::Duration;

use crate::pacing::{DEFAULT_BASE_DELAY, Pacing, Speed};
use crate::sequence::{SeededRng, VALUE_MIN, VALUE_SPAN};

/// Largest sequence the engine will generate.
pub const MAX_SIZE: usize = 200;

/// Size of the sequence generated on construction.
pub const DEFAULT_SIZE: usize = 50;

/// Configuration for a controller.
///
/// # Example
///
/// ```
/// use sortviz_core::EngineConfig;
/// use std::time::Duration;
///
/// let config = EngineConfig::default()
///     .with_seed(7)
///     .with_size_bounds(5..=200)
///     .with_base_delay(Duration::from_millis(500));
/// assert_eq!(config.clamp_size(1), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Full-weight pause at speed 1.0.
    pub base_delay: Duration,
    /// Speed applied before anyone calls `set_speed`.
    pub initial_speed: Speed,
    /// Length of the sequence generated on construction.
    pub initial_size: usize,
    /// Accepted generation sizes; requests outside are clamped.
    pub size_bounds: RangeInclusive<usize>,
    /// Range generated magnitudes are drawn from.
    pub value_range: Range<u32>,
    /// Seed for generation. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            initial_speed: Speed::default(),
            initial_size: DEFAULT_SIZE,
            size_bounds: 1..=MAX_SIZE,
            value_range: VALUE_MIN..VALUE_MIN + VALUE_SPAN,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Configuration for headless runs: no pauses, fixed seed.
    pub fn headless() -> Self {
        Self::default()
            .with_base_delay(Duration::ZERO)
            .with_seed(0)
    }

    /// Set the full-weight pause.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the starting speed.
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.initial_speed = speed;
        self
    }

    /// Set the initial sequence length.
    #[must_use]
    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// Set the accepted generation sizes.
    #[must_use]
    pub fn with_size_bounds(mut self, bounds: RangeInclusive<usize>) -> Self {
        self.size_bounds = bounds;
        self
    }

    /// Set the magnitude range.
    #[must_use]
    pub fn with_value_range(mut self, range: Range<u32>) -> Self {
        self.value_range = range;
        self
    }

    /// Fix the generation seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clamp a requested size into [`size_bounds`](Self::size_bounds).
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(*self.size_bounds.start(), *self.size_bounds.end())
    }

    /// Pacing derived from the base delay.
    pub fn pacing(&self) -> Pacing {
        Pacing::new(self.base_delay)
    }

    /// Generator for this configuration.
    pub fn rng(&self) -> SeededRng {
        match self.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_allow_single_element() {
        let config = EngineConfig::default();
        assert_eq!(config.clamp_size(0), 1);
        assert_eq!(config.clamp_size(1), 1);
        assert_eq!(config.clamp_size(10_000), MAX_SIZE);
    }

    #[test]
    fn headless_never_pauses() {
        let config = EngineConfig::headless();
        assert_eq!(config.pacing(), Pacing::instant());
        assert_eq!(config.seed, Some(0));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = EngineConfig::default().with_seed(99);
        assert_eq!(config.rng().next_u64(), config.rng().next_u64());
    }
}
