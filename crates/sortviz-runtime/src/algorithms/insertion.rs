#![forbid(unsafe_code)]

use sortviz_core::Highlight;

use crate::error::Cancelled;
use crate::session::Session;

/// Insertion sort by adjacent swaps. Each new element gets a focus
/// highlight before it is walked left into place.
pub fn insertion_sort(s: &mut Session<'_>) -> Result<(), Cancelled> {
    for i in 1..s.len() {
        s.highlight(Highlight::Comparing, i)?;
        let mut j = i;
        while j > 0 && s.compare(j - 1, j)? {
            s.swap(j - 1, j)?;
            j -= 1;
        }
    }
    Ok(())
}
