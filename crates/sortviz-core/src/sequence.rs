#![forbid(unsafe_code)]

//! The sequence being sorted and its deterministic generator.
//!
//! A [`Sequence`] is a fixed-length list of non-negative magnitudes. Its
//! length never changes during a run; only in-place exchanges and (for merge
//! sort) single-cell writes mutate it.

use std::collections::HashMap;
use std::ops::Range;

/// Smallest generated magnitude (inclusive).
pub const VALUE_MIN: u32 = 10;

/// Width of the generated magnitude range. Values fall in
/// `VALUE_MIN..VALUE_MIN + VALUE_SPAN`.
pub const VALUE_SPAN: u32 = 300;

// ============================================================================
// Seeded RNG
// ============================================================================

/// Simple LCG PRNG for deterministic generation.
///
/// Not suitable for anything but filling bars with heights; the point is that
/// a seed reproduces the same sequence on every platform.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Seed from the wall clock.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed);
        let seed = nanos ^ u64::from(std::process::id()).rotate_left(32);
        crate::debug!(seed, "rng seeded from clock");
        Self::new(seed)
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // High bits of an LCG are the well-distributed ones.
        self.state >> 11
    }

    /// Uniform value in `range` (returns `range.start` for empty ranges).
    pub fn next_in(&mut self, range: Range<u32>) -> u32 {
        if range.end <= range.start {
            return range.start;
        }
        let span = u64::from(range.end - range.start);
        range.start + (self.next_u64() % span) as u32
    }
}

// ============================================================================
// Sequence
// ============================================================================

/// Ordered, mutable list of magnitudes rendered as bars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<u32>,
}

impl Sequence {
    /// Wrap explicit values.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Fill `len` cells with magnitudes drawn from `range`.
    pub fn random(len: usize, range: Range<u32>, rng: &mut SeededRng) -> Self {
        crate::trace!(len, start = range.start, end = range.end, "generating sequence");
        let values = (0..len).map(|_| rng.next_in(range.clone())).collect();
        Self { values }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only view for rendering.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Mutable view handed to a run session.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.values
    }

    /// Largest magnitude, used to scale bar heights.
    pub fn max(&self) -> Option<u32> {
        self.values.iter().copied().max()
    }

    /// Whether the values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        is_non_decreasing(&self.values)
    }

    /// Whether `self` holds exactly the same multiset of values as `other`.
    pub fn is_permutation_of(&self, other: &[u32]) -> bool {
        is_permutation(&self.values, other)
    }

    /// Consume into the underlying values.
    pub fn into_vec(self) -> Vec<u32> {
        self.values
    }
}

impl From<Vec<u32>> for Sequence {
    fn from(values: Vec<u32>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[u32]> for Sequence {
    fn as_ref(&self) -> &[u32] {
        &self.values
    }
}

/// Whether `values` is in non-decreasing order.
pub fn is_non_decreasing(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Whether `a` and `b` hold the same multiset of values.
pub fn is_permutation(a: &[u32], b: &[u32]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts: HashMap<u32, i64> = HashMap::with_capacity(a.len());
    for &v in a {
        *counts.entry(v).or_default() += 1;
    }
    for &v in b {
        *counts.entry(v).or_default() -= 1;
    }
    counts.values().all(|&c| c == 0)
}
