#![allow(dead_code)]
use nd_containers::matrices::{SegmentLayout, SparseMatrix};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Random sparsity pattern: `(capacities, entries)` with at most `max_per_row`
/// distinct columns per row.
pub fn random_pattern(
    rng: &mut SmallRng,
    rows: usize,
    columns: usize,
    max_per_row: usize,
) -> (Vec<usize>, Vec<(usize, usize, f64)>) {
    let mut caps = Vec::with_capacity(rows);
    let mut entries = Vec::new();
    for r in 0..rows {
        let n = rng.gen_range(0..=max_per_row.min(columns));
        let mut cols: Vec<usize> = (0..columns).collect();
        for i in 0..n {
            let j = rng.gen_range(i..columns);
            cols.swap(i, j);
        }
        caps.push(n);
        for &c in &cols[..n] {
            entries.push((r, c, rng.gen_range(-10.0..10.0)));
        }
    }
    (caps, entries)
}

/// Build a matrix of layout `L` from a pattern.
pub fn assemble<L: SegmentLayout>(
    layout: L,
    rows: usize,
    columns: usize,
    caps: &[usize],
    entries: &[(usize, usize, f64)],
) -> SparseMatrix<f64, L> {
    let mut m = SparseMatrix::with_layout(layout);
    m.set_dimensions(rows, columns);
    m.set_row_capacities(caps).unwrap();
    for &(r, c, v) in entries {
        m.set_element(r, c, v).unwrap();
    }
    m
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
