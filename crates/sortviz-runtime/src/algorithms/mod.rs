#![forbid(unsafe_code)]

//! The algorithm library.
//!
//! Each algorithm is index arithmetic over `0..len` composed from the
//! [`Session`] primitives. None of them read the sequence directly; merge
//! sort's snapshot and write-back are the only exceptions and go through
//! dedicated session methods.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use sortviz_core::AlgorithmId;

use crate::error::Cancelled;
use crate::session::Session;

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

/// Signature shared by every algorithm.
pub type SortFn = fn(&mut Session<'_>) -> Result<(), Cancelled>;

/// The procedure implementing `algorithm`.
pub fn sort_fn(algorithm: AlgorithmId) -> SortFn {
    match algorithm {
        AlgorithmId::Bubble => bubble_sort,
        AlgorithmId::Selection => selection_sort,
        AlgorithmId::Insertion => insertion_sort,
        AlgorithmId::Merge => merge_sort,
        AlgorithmId::Quick => quick_sort,
        AlgorithmId::Heap => heap_sort,
    }
}

/// Run `algorithm` to completion or cancellation.
pub fn run(algorithm: AlgorithmId, session: &mut Session<'_>) -> Result<(), Cancelled> {
    sort_fn(algorithm)(session)
}
