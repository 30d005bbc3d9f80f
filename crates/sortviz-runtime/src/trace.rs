//! Step traces for deterministic run comparison.
//!
//! A [`StepTrace`] is the ordered list of suspend points a run executed,
//! with the delay computed for each. Entries carry monotonic sequence
//! numbers (never wall-clock time), so two runs of the same algorithm on the
//! same input at the same speed produce identical traces and checksums.
//!
//! # Example
//!
//! ```
//! use sortviz_runtime::driver::Step;
//! use sortviz_runtime::trace::StepTrace;
//! use std::time::Duration;
//!
//! let mut trace = StepTrace::new();
//! trace.record(Step::Compare { a: 0, b: 1 }, Duration::from_millis(200));
//! trace.record(Step::Swap { a: 0, b: 1 }, Duration::from_millis(200));
//! assert_eq!(trace.len(), 2);
//! assert_eq!(trace.checksum_hex().len(), 16);
//! ```

#![forbid(unsafe_code)]

use std::time::Duration;

use sortviz_core::Highlight;

use crate::driver::Step;

/// One recorded suspend point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Position in the trace, starting at 0.
    pub seq: u64,
    pub step: Step,
    pub delay: Duration,
}

/// Ordered record of suspend points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTrace {
    entries: Vec<TraceEntry>,
}

impl StepTrace {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn record(&mut self, step: Step, delay: Duration) {
        let seq = self.entries.len() as u64;
        self.entries.push(TraceEntry { seq, step, delay });
    }

    /// Recorded entries, oldest first.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded steps without delays.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.entries.iter().map(|e| e.step)
    }

    /// Number of steps with the given [`Step::name`].
    pub fn count(&self, name: &str) -> usize {
        self.entries.iter().filter(|e| e.step.name() == name).count()
    }

    /// Sum of all recorded delays.
    pub fn total_delay(&self) -> Duration {
        self.entries.iter().map(|e| e.delay).sum()
    }

    /// Forget all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export as JSON lines, one object per step.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    r#"{{"seq":{},"step":"{}","detail":"{}","delay_us":{}}}"#,
                    e.seq,
                    e.step.name(),
                    e.step,
                    e.delay.as_micros()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// FNV-1a checksum over sequence numbers, steps and delays.
    ///
    /// Stable across platforms; usable for golden comparisons.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        const FNV_OFFSET: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;

        let mut hash = FNV_OFFSET;
        let mut feed = |bytes: &[u8]| {
            for &byte in bytes {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        };

        for entry in &self.entries {
            feed(&entry.seq.to_le_bytes());
            feed(&step_bytes(&entry.step));
            feed(&(entry.delay.as_nanos() as u64).to_le_bytes());
        }

        hash
    }

    /// Checksum as a 16-digit hex string.
    #[must_use]
    pub fn checksum_hex(&self) -> String {
        format!("{:016x}", self.checksum())
    }
}

fn step_bytes(step: &Step) -> [u8; 17] {
    let (tag, a, b) = match *step {
        Step::Compare { a, b } => (1u8, a, b),
        Step::Swap { a, b } => (2, a, b),
        Step::Mark { index, tag } => (3, index, highlight_code(tag)),
        Step::Write { index, counted } => (4, index, usize::from(counted)),
        Step::Sorted { index } => (5, index, 0),
    };
    let mut out = [0u8; 17];
    out[0] = tag;
    out[1..9].copy_from_slice(&(a as u64).to_le_bytes());
    out[9..17].copy_from_slice(&(b as u64).to_le_bytes());
    out
}

fn highlight_code(tag: Highlight) -> usize {
    match tag {
        Highlight::Comparing => 0,
        Highlight::Swapping => 1,
        Highlight::Pivot => 2,
        Highlight::Sorted => 3,
    }
}
