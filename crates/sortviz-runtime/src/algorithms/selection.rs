#![forbid(unsafe_code)]

use crate::error::Cancelled;
use crate::session::Session;

/// Selection sort. Swaps at most once per position, and only when the
/// minimum is somewhere else.
pub fn selection_sort(s: &mut Session<'_>) -> Result<(), Cancelled> {
    let n = s.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if s.compare(min, j)? {
                min = j;
            }
        }
        if min != i {
            s.swap(i, min)?;
        }
    }
    Ok(())
}
