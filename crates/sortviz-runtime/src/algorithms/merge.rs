#![forbid(unsafe_code)]

//! Top-down merge sort.
//!
//! The merge step reads from snapshots of both halves and writes back one
//! cell per suspend point. Only writes chosen by a head-to-head comparison
//! are counted; the drain of whichever half is left over is free.

use crate::error::Cancelled;
use crate::session::Session;

pub fn merge_sort(s: &mut Session<'_>) -> Result<(), Cancelled> {
    match s.len() {
        0 => Ok(()),
        n => sort_range(s, 0, n - 1),
    }
}

fn sort_range(s: &mut Session<'_>, left: usize, right: usize) -> Result<(), Cancelled> {
    if left >= right {
        return Ok(());
    }
    let mid = (left + right) / 2;
    sort_range(s, left, mid)?;
    sort_range(s, mid + 1, right)?;
    merge(s, left, mid, right)
}

fn merge(s: &mut Session<'_>, left: usize, mid: usize, right: usize) -> Result<(), Cancelled> {
    let lhs = s.snapshot(left..mid + 1);
    let rhs = s.snapshot(mid + 1..right + 1);
    let mut cursor = Cursor { i: 0, j: 0, k: left };

    let result = cursor.run(s, &lhs, &rhs);
    if result.is_err() {
        let rest: Vec<u32> = lhs[cursor.i..]
            .iter()
            .chain(&rhs[cursor.j..])
            .copied()
            .collect();
        s.restore(cursor.k, &rest);
    }
    result
}

/// Read positions in the two halves and the next write position.
struct Cursor {
    i: usize,
    j: usize,
    k: usize,
}

impl Cursor {
    fn run(&mut self, s: &mut Session<'_>, lhs: &[u32], rhs: &[u32]) -> Result<(), Cancelled> {
        while self.i < lhs.len() && self.j < rhs.len() {
            // Ties take the left half, keeping the sort stable.
            if lhs[self.i] <= rhs[self.j] {
                s.write(self.k, lhs[self.i], true)?;
                self.i += 1;
            } else {
                s.write(self.k, rhs[self.j], true)?;
                self.j += 1;
            }
            self.k += 1;
        }
        while self.i < lhs.len() {
            s.write(self.k, lhs[self.i], false)?;
            self.i += 1;
            self.k += 1;
        }
        while self.j < rhs.len() {
            s.write(self.k, rhs[self.j], false)?;
            self.j += 1;
            self.k += 1;
        }
        Ok(())
    }
}
