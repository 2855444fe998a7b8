//! Order-independent traversal over index boxes.
//!
//! Callbacks may run concurrently and in any order; each index of the region
//! is visited exactly once. With the `rayon` feature the work is spread over
//! the global rayon pool, otherwise it runs on the calling thread.
//!
//! A region is a subset of the logical box `[0, sizes)`:
//! - `All`: every index,
//! - `Interior`: `1 <= idx[d] <= sizes[d] - 2` on every axis,
//! - `Boundary`: the complement of `Interior`.
//!
//! Only the part of the region that falls inside the traversed box
//! `[begins, ends)` is visited; for a distributed array the box is the locally
//! owned range and `sizes` is the global shape.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::containers::ndarray::indexer::Indexer;

/// Which part of the logical box a traversal visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    All,
    Interior,
    Boundary,
}

impl Region {
    /// Whether `idx` (inside `[0, sizes)`) belongs to this region.
    #[inline]
    pub fn admits<const D: usize>(self, idx: &[isize; D], sizes: &[usize; D]) -> bool {
        match self {
            Region::All => true,
            Region::Interior => is_interior(idx, sizes),
            Region::Boundary => !is_interior(idx, sizes),
        }
    }
}

#[inline]
fn is_interior<const D: usize>(idx: &[isize; D], sizes: &[usize; D]) -> bool {
    idx.iter()
        .zip(sizes)
        .all(|(&i, &s)| i >= 1 && i <= s as isize - 2)
}

/// Box to traverse, in the coordinates the callback receives.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Domain<const D: usize> {
    pub begins: [isize; D],
    pub ends: [isize; D],
    pub sizes: [usize; D],
}

impl<const D: usize> Domain<D> {
    /// The full box `[0, sizes)`.
    pub fn whole(sizes: [usize; D]) -> Self {
        Self {
            begins: [0; D],
            ends: sizes.map(|s| s as isize),
            sizes,
        }
    }

    fn contains(&self, idx: &[isize; D]) -> bool {
        (0..D).all(|d| self.begins[d] <= idx[d] && idx[d] < self.ends[d])
    }

    /// Sub-box a region can be restricted to before filtering.
    fn narrowed(&self, region: Region) -> ([isize; D], [isize; D]) {
        match region {
            Region::Interior => {
                let mut b = self.begins;
                let mut e = self.ends;
                for d in 0..D {
                    b[d] = b[d].max(1);
                    e[d] = e[d].min(self.sizes[d] as isize - 1);
                }
                (b, e)
            }
            Region::All | Region::Boundary => (self.begins, self.ends),
        }
    }
}

/// Number of indices in `[b, e)`, 0 if any axis is empty.
fn box_volume<const D: usize>(b: &[isize; D], e: &[isize; D]) -> usize {
    (0..D)
        .map(|d| (e[d] - b[d]).max(0) as usize)
        .product()
}

/// Row-major decode of the `n`-th index of the box starting at `b`.
#[inline]
fn box_index<const D: usize>(mut n: usize, b: &[isize; D], e: &[isize; D]) -> [isize; D] {
    let mut idx = [0isize; D];
    for d in (0..D).rev() {
        let ext = (e[d] - b[d]) as usize;
        idx[d] = b[d] + (n % ext) as isize;
        n /= ext;
    }
    idx
}

/// Invoke `f` once per index of `region` inside `domain`.
pub(crate) fn for_each_index<const D: usize, F>(domain: Domain<D>, region: Region, f: F)
where
    F: Fn([isize; D]) + Sync + Send,
{
    let (b, e) = domain.narrowed(region);
    let total = box_volume(&b, &e);
    let visit = |n: usize| {
        let idx = box_index(n, &b, &e);
        if region.admits(&idx, &domain.sizes) {
            f(idx);
        }
    };
    #[cfg(feature = "rayon")]
    (0..total).into_par_iter().for_each(visit);
    #[cfg(not(feature = "rayon"))]
    (0..total).for_each(visit);
}

/// Invoke `f` with an exclusive reference to every element of `region` inside
/// `domain`.
///
/// `data` is the whole row-major storage described by `indexer`; `origin` is
/// added to local indices to obtain the coordinates the callback receives.
pub(crate) fn for_each_element_mut<V, const D: usize, F>(
    indexer: &Indexer<D>,
    origin: [isize; D],
    data: &mut [V],
    domain: Domain<D>,
    region: Region,
    f: F,
) where
    V: Send,
    F: Fn([isize; D], &mut V) + Sync + Send,
{
    let visit = |(off, v): (usize, &mut V)| {
        let mut idx = indexer.index_of_offset(off);
        for d in 0..D {
            idx[d] += origin[d];
        }
        if domain.contains(&idx) && region.admits(&idx, &domain.sizes) {
            f(idx, v);
        }
    };
    #[cfg(feature = "rayon")]
    data.par_iter_mut().enumerate().for_each(visit);
    #[cfg(not(feature = "rayon"))]
    data.iter_mut().enumerate().for_each(visit);
}
