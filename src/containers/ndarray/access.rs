//! Element access shared by N-dimensional arrays, views and distributed arrays.

use crate::container_error::Result;
use crate::containers::element::Element;
use crate::containers::ndarray::indexer::{Indexer, to_fixed};

/// Multi-index element access.
///
/// Indices are the logical coordinates of the implementor: local for a plain
/// [`NDArray`](super::NDArray), global for distributed arrays and their local
/// views.
pub trait NDArrayAccess<V: Element, const D: usize> {
    /// Indexer of the underlying storage.
    fn indexer(&self) -> &Indexer<D>;

    /// Half-open range `[begins, ends)` of owned indices, overlap excluded.
    fn owned_range(&self) -> ([isize; D], [isize; D]);

    fn get(&self, idx: [isize; D]) -> Result<V>;

    fn set(&mut self, idx: [isize; D], value: V) -> Result<()>;

    fn dimension(&self) -> usize {
        D
    }

    /// [`get`](Self::get) with the number of indices checked at run time.
    fn get_dyn(&self, idx: &[isize]) -> Result<V> {
        self.get(to_fixed(idx)?)
    }

    /// [`set`](Self::set) with the number of indices checked at run time.
    fn set_dyn(&mut self, idx: &[isize], value: V) -> Result<()> {
        self.set(to_fixed(idx)?, value)
    }
}

/// Equal owned ranges and equal elements at every owned index.
pub(crate) fn logical_eq<V, A, B, const D: usize>(a: &A, b: &B) -> bool
where
    V: Element,
    A: NDArrayAccess<V, D> + ?Sized,
    B: NDArrayAccess<V, D> + ?Sized,
{
    let (begins, ends) = a.owned_range();
    if (begins, ends) != b.owned_range() {
        return false;
    }
    if (0..D).any(|d| begins[d] >= ends[d]) {
        return true;
    }
    let mut idx = begins;
    loop {
        if a.get(idx).ok() != b.get(idx).ok() {
            return false;
        }
        // odometer increment, last axis fastest
        let mut d = D;
        loop {
            if d == 0 {
                return true;
            }
            d -= 1;
            idx[d] += 1;
            if idx[d] < ends[d] {
                break;
            }
            idx[d] = begins[d];
        }
    }
}
