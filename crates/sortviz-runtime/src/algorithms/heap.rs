#![forbid(unsafe_code)]

use crate::error::Cancelled;
use crate::session::Session;

/// Heap sort over an implicit max-heap.
pub fn heap_sort(s: &mut Session<'_>) -> Result<(), Cancelled> {
    let n = s.len();
    for i in (0..n / 2).rev() {
        heapify(s, n, i)?;
    }
    for end in (1..n).rev() {
        s.swap(0, end)?;
        heapify(s, end, 0)?;
    }
    Ok(())
}

/// Sift `sequence[i]` down within the first `n` elements.
fn heapify(s: &mut Session<'_>, n: usize, i: usize) -> Result<(), Cancelled> {
    let mut largest = i;
    let left = 2 * i + 1;
    let right = 2 * i + 2;

    if left < n && s.compare(left, largest)? {
        largest = left;
    }
    if right < n && s.compare(right, largest)? {
        largest = right;
    }
    if largest != i {
        s.swap(i, largest)?;
        heapify(s, n, largest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{run_instant, run_traced};
    use crate::driver::Step;

    #[test]
    fn two_elements() {
        let (values, stats) = run_instant(heap_sort, &[1, 2]);
        assert_eq!(values, vec![1, 2]);
        // build: compare(1,0) swaps; extract: swap(0,1)
        assert_eq!(stats.comparisons, 1);
        assert_eq!(stats.swaps, 2);
    }

    #[test]
    fn build_starts_at_last_parent() {
        let (_, steps) = run_traced(heap_sort, &[4, 5, 6, 7, 8]);
        assert_eq!(steps[0], Step::Compare { a: 3, b: 1 });
    }

    #[test]
    fn sorts_with_duplicates() {
        let (values, _) = run_instant(heap_sort, &[3, 9, 3, 1, 9, 0]);
        assert_eq!(values, vec![0, 1, 3, 3, 9, 9]);
    }
}
