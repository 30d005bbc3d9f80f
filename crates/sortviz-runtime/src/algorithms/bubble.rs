#![forbid(unsafe_code)]

use crate::error::Cancelled;
use crate::session::Session;

/// Adjacent-pair bubble sort. Each pass carries the largest remaining value
/// to the end of the unsorted prefix.
pub fn bubble_sort(s: &mut Session<'_>) -> Result<(), Cancelled> {
    let n = s.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if s.compare(j, j + 1)? {
                s.swap(j, j + 1)?;
            }
        }
    }
    Ok(())
}
