//! Engine counters versus plain reference implementations.
//!
//! Each reference sorts a `Vec<u32>` directly and counts the operations the
//! visualizer charges for. The engine must match both the final order and
//! the counts exactly, for every algorithm.

use proptest::prelude::*;
use sortviz_core::{AlgorithmId, RunStats};
use sortviz_runtime::{RunSimulator, RunStatus};

#[derive(Default)]
struct Tally {
    comparisons: u64,
    swaps: u64,
}

impl Tally {
    fn gt(&mut self, v: &[u32], i: usize, j: usize) -> bool {
        self.comparisons += 1;
        v[i] > v[j]
    }

    fn swap(&mut self, v: &mut [u32], i: usize, j: usize) {
        self.swaps += 1;
        v.swap(i, j);
    }

    fn stats(&self) -> RunStats {
        RunStats::new(self.comparisons, self.swaps)
    }
}

fn bubble(v: &mut [u32], t: &mut Tally) {
    let n = v.len();
    for pass in 1..n {
        for j in 0..n - pass {
            if t.gt(v, j, j + 1) {
                t.swap(v, j, j + 1);
            }
        }
    }
}

fn selection(v: &mut [u32], t: &mut Tally) {
    for i in 0..v.len() {
        let mut min = i;
        for j in i + 1..v.len() {
            if t.gt(v, min, j) {
                min = j;
            }
        }
        if min != i {
            t.swap(v, i, min);
        }
    }
}

fn insertion(v: &mut [u32], t: &mut Tally) {
    for i in 1..v.len() {
        let mut j = i as isize - 1;
        while j >= 0 && t.gt(v, j as usize, j as usize + 1) {
            t.swap(v, j as usize, j as usize + 1);
            j -= 1;
        }
    }
}

fn merge(v: &mut [u32], t: &mut Tally) {
    if v.len() < 2 {
        return;
    }
    let mid = (v.len() - 1) / 2 + 1;
    merge(&mut v[..mid], t);
    merge(&mut v[mid..], t);
    let (left, right) = (v[..mid].to_vec(), v[mid..].to_vec());
    let (mut l, mut r) = (left.iter().peekable(), right.iter().peekable());
    let mut out = Vec::with_capacity(v.len());
    while let (Some(&&a), Some(&&b)) = (l.peek(), r.peek()) {
        t.comparisons += 1;
        if a <= b {
            out.push(a);
            l.next();
        } else {
            out.push(b);
            r.next();
        }
    }
    out.extend(l);
    out.extend(r);
    v.copy_from_slice(&out);
}

fn quick(v: &mut [u32], t: &mut Tally, low: isize, high: isize) {
    if low >= high {
        return;
    }
    let (lo, hi) = (low as usize, high as usize);
    let mut i = low - 1;
    for j in lo..hi {
        if t.gt(v, hi, j) {
            i += 1;
            if i as usize != j {
                t.swap(v, i as usize, j);
            }
        }
    }
    let p = (i + 1) as usize;
    t.swap(v, p, hi);
    quick(v, t, low, p as isize - 1);
    quick(v, t, p as isize + 1, high);
}

fn heap(v: &mut [u32], t: &mut Tally) {
    fn sift(v: &mut [u32], t: &mut Tally, n: usize, i: usize) {
        let mut largest = i;
        for child in [2 * i + 1, 2 * i + 2] {
            if child < n && t.gt(v, child, largest) {
                largest = child;
            }
        }
        if largest != i {
            t.swap(v, i, largest);
            sift(v, t, n, largest);
        }
    }
    let n = v.len();
    for i in (0..n / 2).rev() {
        sift(v, t, n, i);
    }
    for end in (1..n).rev() {
        t.swap(v, 0, end);
        sift(v, t, end, 0);
    }
}

fn reference(algo: AlgorithmId, input: &[u32]) -> (Vec<u32>, RunStats) {
    let mut v = input.to_vec();
    let mut t = Tally::default();
    match algo {
        AlgorithmId::Bubble => bubble(&mut v, &mut t),
        AlgorithmId::Selection => selection(&mut v, &mut t),
        AlgorithmId::Insertion => insertion(&mut v, &mut t),
        AlgorithmId::Merge => merge(&mut v, &mut t),
        AlgorithmId::Quick => {
            let high = v.len() as isize - 1;
            quick(&mut v, &mut t, 0, high);
        }
        AlgorithmId::Heap => heap(&mut v, &mut t),
    }
    (v, t.stats())
}

fn engine(algo: AlgorithmId, input: &[u32]) -> (Vec<u32>, RunStats) {
    let mut sim = RunSimulator::new(input.to_vec());
    assert_eq!(sim.run(algo).unwrap(), RunStatus::Completed);
    (sim.values().to_vec(), sim.stats())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn engine_matches_reference(
        algo in prop::sample::select(AlgorithmId::ALL.to_vec()),
        // Narrow value range so duplicates are common.
        input in prop::collection::vec(0u32..12, 0..=64),
    ) {
        prop_assert_eq!(engine(algo, &input), reference(algo, &input), "{}", algo);
    }
}

// ── Closed forms ──────────────────────────────────────────────────────────

fn triangle(n: u64) -> u64 {
    n * (n - 1) / 2
}

#[test]
fn bubble_on_reversed_input() {
    for n in [2usize, 7, 30] {
        let input: Vec<u32> = (0..n as u32).rev().collect();
        let (_, stats) = engine(AlgorithmId::Bubble, &input);
        assert_eq!(stats, RunStats::new(triangle(n as u64), triangle(n as u64)));
    }
}

#[test]
fn selection_comparisons_are_fixed() {
    for input in [vec![9, 8, 7, 6, 5, 4], vec![1, 2, 3, 4, 5, 6], vec![4, 4, 4, 1, 1, 1]] {
        let (_, stats) = engine(AlgorithmId::Selection, &input);
        assert_eq!(stats.comparisons, triangle(6));
    }
}

#[test]
fn insertion_on_sorted_input() {
    let input: Vec<u32> = (10..60).collect();
    let (_, stats) = engine(AlgorithmId::Insertion, &input);
    assert_eq!(stats, RunStats::new(49, 0));
}

#[test]
fn insertion_small_example() {
    let (values, stats) = engine(AlgorithmId::Insertion, &[5, 3, 8, 1]);
    assert_eq!(values, vec![1, 3, 5, 8]);
    assert_eq!(stats, RunStats::new(5, 4));
}

#[test]
fn quick_counts_final_self_swap() {
    // Already sorted: every partition ends with swap(high, high).
    let (_, stats) = engine(AlgorithmId::Quick, &[1, 2, 3, 4, 5]);
    assert_eq!(stats, RunStats::new(10, 4));
}
