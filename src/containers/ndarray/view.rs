//! Non-owning N-dimensional views.

use std::fmt;

use crate::container_error::Result;
use crate::containers::array_view::{ArrayView, ViewData};
use crate::containers::buffer::BufferInfo;
use crate::containers::element::Element;
use crate::containers::ndarray::access::{NDArrayAccess, logical_eq};
use crate::containers::ndarray::indexer::Indexer;
use crate::containers::ndarray::traversal::{self, Domain, Region};

/// View of an N-dimensional array's storage.
///
/// Logical index `origin` maps to local index zero, so a view of a
/// distributed array's local block is addressed with global indices.
/// Traversal regions are classified against `global_sizes`.
#[derive(Debug)]
pub struct NDArrayView<'a, V, const D: usize> {
    indexer: Indexer<D>,
    origin: [isize; D],
    global_sizes: [usize; D],
    data: ViewData<'a, V>,
}

impl<'a, V: Element, const D: usize> NDArrayView<'a, V, D> {
    pub(crate) fn new(indexer: Indexer<D>, origin: [isize; D], data: ViewData<'a, V>) -> Self {
        debug_assert_eq!(data.as_slice().len(), indexer.storage_size());
        Self {
            global_sizes: *indexer.sizes(),
            indexer,
            origin,
            data,
        }
    }

    pub(crate) fn with_global_sizes(mut self, global_sizes: [usize; D]) -> Self {
        self.global_sizes = global_sizes;
        self
    }

    /// Local shape of the viewed block.
    pub fn sizes(&self) -> &[usize; D] {
        self.indexer.sizes()
    }

    pub fn overlaps(&self) -> &[usize; D] {
        self.indexer.overlaps()
    }

    /// Logical index of the first owned element.
    pub fn origin(&self) -> &[isize; D] {
        &self.origin
    }

    pub fn storage_size(&self) -> usize {
        self.indexer.storage_size()
    }

    pub fn is_const(&self) -> bool {
        self.data.is_const()
    }

    pub fn get(&self, idx: [isize; D]) -> Result<V> {
        let off = self.indexer.storage_index_shifted(&self.origin, idx)?;
        Ok(self.data.as_slice()[off])
    }

    pub fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        let off = self.indexer.storage_index_shifted(&self.origin, idx)?;
        self.data.as_mut_slice()?[off] = value;
        Ok(())
    }

    /// Fill all viewed storage, overlap included.
    pub fn set_value(&mut self, value: V) -> Result<()> {
        self.data.as_mut_slice()?.fill(value);
        Ok(())
    }

    /// Read-only view of the same storage.
    pub fn const_view(&self) -> NDArrayView<'_, V, D> {
        NDArrayView {
            indexer: self.indexer,
            origin: self.origin,
            global_sizes: self.global_sizes,
            data: self.data.reborrow(),
        }
    }

    /// Flat storage of the view.
    pub fn storage_view(&self) -> ArrayView<'_, V> {
        ArrayView::from_const(self.data.as_slice())
    }

    fn domain(&self) -> Domain<D> {
        let (begins, ends) = self.owned_range();
        Domain {
            begins,
            ends,
            sizes: self.global_sizes,
        }
    }

    pub fn for_all<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::All, f);
    }

    pub fn for_interior<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::Interior, f);
    }

    pub fn for_boundary<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::Boundary, f);
    }

    pub fn for_all_mut<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        self.traverse_mut(Region::All, f)
    }

    pub fn for_interior_mut<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        self.traverse_mut(Region::Interior, f)
    }

    pub fn for_boundary_mut<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        self.traverse_mut(Region::Boundary, f)
    }

    fn traverse_mut<F>(&mut self, region: Region, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        let domain = self.domain();
        let data = self.data.as_mut_slice()?;
        traversal::for_each_element_mut(&self.indexer, self.origin, data, domain, region, f);
        Ok(())
    }

    pub fn buffer_info(&self) -> BufferInfo<'_> {
        super::describe(&self.indexer, self.data.as_slice().as_ptr())
    }
}

impl<V: Element, const D: usize> NDArrayAccess<V, D> for NDArrayView<'_, V, D> {
    fn indexer(&self) -> &Indexer<D> {
        &self.indexer
    }

    fn owned_range(&self) -> ([isize; D], [isize; D]) {
        let mut ends = self.origin;
        for (e, &s) in ends.iter_mut().zip(self.indexer.sizes()) {
            *e += s as isize;
        }
        (self.origin, ends)
    }

    fn get(&self, idx: [isize; D]) -> Result<V> {
        NDArrayView::get(self, idx)
    }

    fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        NDArrayView::set(self, idx, value)
    }
}

impl<V: Element, const D: usize> PartialEq for NDArrayView<'_, V, D> {
    fn eq(&self, other: &Self) -> bool {
        logical_eq(self, other)
    }
}

impl<V: Element, const D: usize> fmt::Display for NDArrayView<'_, V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_header(f, "NDArrayView", V::TYPE.rust_name(), self.sizes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container_error::ErrorKind;
    use crate::containers::ndarray::NDArray;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn shifted_origin_uses_global_indices() {
        let mut data = vec![0i32; 5];
        let ix = Indexer::row_major([3], [1]);
        let mut v = NDArrayView::new(ix, [3], ViewData::Mut(&mut data)).with_global_sizes([12]);
        v.set([3], 1).unwrap();
        v.set([2], 9).unwrap();
        v.set([6], 8).unwrap();
        assert_eq!(v.get([5]).unwrap(), 0);
        let e = v.get([7]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Index);
        assert_eq!(v.owned_range(), ([3], [6]));
        drop(v);
        assert_eq!(data, vec![9, 1, 0, 0, 8]);
    }

    #[test]
    fn view_traversal_matches_array() {
        let mut a = NDArray::<u64, 2>::with_sizes([4, 5]);
        let mut v = a.view().unwrap();
        v.for_interior_mut(|idx, x| *x = (idx[0] * 5 + idx[1]) as u64).unwrap();
        let count = AtomicUsize::new(0);
        v.for_boundary(|_| {
            count.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(count.into_inner(), 14);
        assert_eq!(a.get([2, 3]).unwrap(), 13);
        assert_eq!(a.get([0, 3]).unwrap(), 0);
    }

    #[test]
    fn const_reborrow_and_equality() {
        let mut a = NDArray::<f32, 1>::with_sizes([3]);
        a.set_value(1.5).unwrap();
        let v = a.view().unwrap();
        let c = v.const_view();
        assert!(c.is_const());
        assert_eq!(c, v.const_view());
        assert_eq!(c.to_string(), "NDArrayView[1, f32](3)");
    }
}
