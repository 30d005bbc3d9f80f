#![forbid(unsafe_code)]

use sortviz_core::Highlight;

use crate::error::Cancelled;
use crate::session::Session;

/// Lomuto quick sort with the last element as pivot.
pub fn quick_sort(s: &mut Session<'_>) -> Result<(), Cancelled> {
    let n = s.len();
    if n > 1 {
        quick(s, 0, n - 1)?;
    }
    Ok(())
}

fn quick(s: &mut Session<'_>, low: usize, high: usize) -> Result<(), Cancelled> {
    if low < high {
        let pivot = partition(s, low, high)?;
        if pivot > low {
            quick(s, low, pivot - 1)?;
        }
        quick(s, pivot + 1, high)?;
    }
    Ok(())
}

/// Moves everything strictly smaller than `sequence[high]` to the front of
/// `low..high`, then places the pivot. Returns its final index.
fn partition(s: &mut Session<'_>, low: usize, high: usize) -> Result<usize, Cancelled> {
    s.highlight(Highlight::Pivot, high)?;
    let mut store = low;
    for j in low..high {
        if s.compare(high, j)? {
            if store != j {
                s.swap(store, j)?;
            }
            store += 1;
        }
    }
    // Always performed, even when `store == high`.
    s.swap(store, high)?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{run_instant, run_traced};
    use crate::driver::Step;

    #[test]
    fn sorted_input_self_swaps_every_pivot() {
        let (values, stats) = run_instant(quick_sort, &[1, 2, 3, 4]);
        assert_eq!(values, vec![1, 2, 3, 4]);
        // partitions of 4, 3, 2 elements: 3 + 2 + 1 comparisons
        assert_eq!(stats.comparisons, 6);
        assert_eq!(stats.swaps, 3);
    }

    #[test]
    fn partition_opens_with_pivot_mark() {
        let (_, steps) = run_traced(quick_sort, &[3, 1, 2]);
        assert_eq!(steps[0], Step::Mark { index: 2, tag: Highlight::Pivot });
        assert_eq!(steps[1], Step::Compare { a: 2, b: 0 });
    }

    #[test]
    fn duplicates_terminate() {
        let (values, _) = run_instant(quick_sort, &[7, 7, 7, 7, 7]);
        assert_eq!(values, vec![7; 5]);
    }

    #[test]
    fn pivot_smallest_lands_at_low() {
        let (values, stats) = run_instant(quick_sort, &[5, 6, 1]);
        assert_eq!(values, vec![1, 5, 6]);
        // [5,6,1]: no compare hits, swap(0,2) -> [1,6,5]; then [6,5]: swap(1,2).
        assert_eq!(stats.comparisons, 3);
        assert_eq!(stats.swaps, 2);
    }
}
