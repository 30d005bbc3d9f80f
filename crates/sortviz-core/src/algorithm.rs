#![forbid(unsafe_code)]

//! The closed set of supported sorting algorithms.

use std::fmt;
use std::str::FromStr;

/// Identifier of a sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmId {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl AlgorithmId {
    /// Every algorithm, in menu order.
    pub const ALL: [AlgorithmId; 6] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
    ];

    /// Short lowercase id (`"bubble"`, `"quick"`, ...).
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
        }
    }

    /// Static description shown next to the bars.
    pub fn info(self) -> &'static AlgorithmInfo {
        match self {
            Self::Bubble => &BUBBLE,
            Self::Selection => &SELECTION,
            Self::Insertion => &INSERTION,
            Self::Merge => &MERGE,
            Self::Quick => &QUICK,
            Self::Heap => &HEAP,
        }
    }

    /// Position in [`AlgorithmId::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&a| a == self).unwrap_or(0)
    }

    /// Next algorithm in menu order, wrapping.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous algorithm in menu order, wrapping.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown algorithm id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    id: String,
}

impl ParseAlgorithmError {
    /// The rejected id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}' (expected one of: bubble, selection, insertion, merge, quick, heap)",
            self.id
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for AlgorithmId {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseAlgorithmError { id: s.to_string() })
    }
}

// ---------------------------------------------------------------------------
// Info table
// ---------------------------------------------------------------------------

/// Human-readable facts about an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub description: &'static str,
}

static BUBBLE: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Repeatedly steps through the list, compares adjacent elements and swaps \
                  them if they are in the wrong order. Passes repeat until the list is sorted.",
};

static SELECTION: AlgorithmInfo = AlgorithmInfo {
    name: "Selection Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Keeps a sorted prefix on the left and an unsorted suffix on the right, \
                  repeatedly selecting the smallest element of the suffix.",
};

static INSERTION: AlgorithmInfo = AlgorithmInfo {
    name: "Insertion Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Builds the sorted list one item at a time by walking each new element \
                  left until it meets a smaller one.",
};

static MERGE: AlgorithmInfo = AlgorithmInfo {
    name: "Merge Sort",
    time_complexity: "O(n log n)",
    space_complexity: "O(n)",
    description: "Divide and conquer: splits the list in halves, sorts each half \
                  recursively, then merges the two sorted halves.",
};

static QUICK: AlgorithmInfo = AlgorithmInfo {
    name: "Quick Sort",
    time_complexity: "O(n log n)",
    space_complexity: "O(log n)",
    description: "Divide and conquer: picks the last element as pivot, partitions the \
                  list around it, and places the pivot in its final position.",
};

static HEAP: AlgorithmInfo = AlgorithmInfo {
    name: "Heap Sort",
    time_complexity: "O(n log n)",
    space_complexity: "O(1)",
    description: "Builds a max heap from the data, then repeatedly moves the maximum to \
                  the end of the unsorted region and restores the heap.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_id() {
        for algo in AlgorithmId::ALL {
            assert_eq!(algo.id().parse::<AlgorithmId>(), Ok(algo));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("  Quick ".parse::<AlgorithmId>(), Ok(AlgorithmId::Quick));
        assert_eq!("HEAP".parse::<AlgorithmId>(), Ok(AlgorithmId::Heap));
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "bogo".parse::<AlgorithmId>().unwrap_err();
        assert_eq!(err.id(), "bogo");
        assert!(err.to_string().contains("bogo"));
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(AlgorithmId::Heap.next(), AlgorithmId::Bubble);
        assert_eq!(AlgorithmId::Bubble.prev(), AlgorithmId::Heap);
        assert_eq!(AlgorithmId::Merge.next().prev(), AlgorithmId::Merge);
    }

    #[test]
    fn info_names_match_ids() {
        assert_eq!(AlgorithmId::Merge.info().name, "Merge Sort");
        assert_eq!(AlgorithmId::Quick.info().space_complexity, "O(log n)");
        assert!(AlgorithmId::ALL.iter().all(|a| !a.info().description.is_empty()));
    }
}
