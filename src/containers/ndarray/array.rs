//! NDArray: an owned N-dimensional array with overlap regions.
//!
//! Shape and storage are configured in two steps: [`set_sizes`] and
//! [`set_overlaps`] describe the index space, [`allocate`] creates the
//! storage. Element access before allocation fails with
//! [`ContainerError::NotAllocated`].
//!
//! [`set_sizes`]: NDArray::set_sizes
//! [`set_overlaps`]: NDArray::set_overlaps
//! [`allocate`]: NDArray::allocate

use std::fmt;

use crate::container_error::{ContainerError, Result};
use crate::containers::array::Array;
use crate::containers::array_view::{ArrayView, ViewData};
use crate::containers::buffer::BufferInfo;
use crate::containers::element::Element;
use crate::containers::ndarray::access::{NDArrayAccess, logical_eq};
use crate::containers::ndarray::indexer::Indexer;
use crate::containers::ndarray::traversal::{self, Domain, Region};
use crate::containers::ndarray::view::NDArrayView;
use crate::debug_invariants::DebugInvariants;

/// Owned `D`-dimensional array of `V`.
///
/// # Invariants
/// - Strides are always row-major for the current sizes and overlaps.
/// - When allocated, the storage holds exactly `indexer.storage_size()` elements.
#[derive(Clone)]
pub struct NDArray<V, const D: usize> {
    indexer: Indexer<D>,
    storage: Option<Array<V>>,
}

impl<V: Element, const D: usize> Default for NDArray<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Element, const D: usize> NDArray<V, D> {
    /// Empty, unallocated array.
    pub fn new() -> Self {
        Self {
            indexer: Indexer::default(),
            storage: None,
        }
    }

    /// Array of shape `sizes`, allocated and value-initialized.
    pub fn with_sizes(sizes: [usize; D]) -> Self {
        Self::with_sizes_and_overlaps(sizes, [0; D])
    }

    /// Array of shape `sizes` with `overlaps` ghost layers, allocated.
    pub fn with_sizes_and_overlaps(sizes: [usize; D], overlaps: [usize; D]) -> Self {
        let mut a = Self {
            indexer: Indexer::row_major(sizes, overlaps),
            storage: None,
        };
        a.allocate();
        a
    }

    /// Set the shape. Storage is released if the storage size changes;
    /// call [`allocate`](Self::allocate) afterwards.
    pub fn set_sizes(&mut self, sizes: [usize; D]) {
        self.reshape(Indexer::row_major(sizes, *self.indexer.overlaps()));
    }

    /// Set the ghost layer width of every axis. Storage is released if the
    /// storage size changes.
    pub fn set_overlaps(&mut self, overlaps: [usize; D]) {
        self.reshape(Indexer::row_major(*self.indexer.sizes(), overlaps));
    }

    fn reshape(&mut self, indexer: Indexer<D>) {
        if self.storage.is_some() && indexer.storage_size() != self.indexer.storage_size() {
            self.storage = None;
        }
        self.indexer = indexer;
    }

    /// (Re)allocate storage for the current shape, filled with `V::default()`.
    pub fn allocate(&mut self) {
        let n = self.indexer.storage_size();
        self.storage = Some(Array::from(vec![V::default(); n]));
        log::debug!(
            "allocated NDArray<{}, {}> with sizes {:?}, overlaps {:?} ({n} elements)",
            V::TYPE.rust_name(),
            D,
            self.indexer.sizes(),
            self.indexer.overlaps()
        );
        self.debug_assert_invariants();
    }

    /// Copy shape and overlaps from `other`; allocate iff `other` is allocated.
    pub fn set_like(&mut self, other: &Self) {
        self.indexer = other.indexer;
        self.storage = None;
        if other.is_allocated() {
            self.allocate();
        }
    }

    /// Drop storage, keeping shape and overlaps.
    pub(crate) fn release(&mut self) {
        self.storage = None;
    }

    /// Drop shape and storage.
    pub fn reset(&mut self) {
        self.indexer = Indexer::default();
        self.storage = None;
    }

    #[inline]
    pub fn indexer(&self) -> &Indexer<D> {
        &self.indexer
    }

    #[inline]
    pub fn sizes(&self) -> &[usize; D] {
        self.indexer.sizes()
    }

    #[inline]
    pub fn strides(&self) -> &[usize; D] {
        self.indexer.strides()
    }

    #[inline]
    pub fn overlaps(&self) -> &[usize; D] {
        self.indexer.overlaps()
    }

    pub fn storage_size(&self) -> usize {
        self.indexer.storage_size()
    }

    pub fn is_allocated(&self) -> bool {
        self.storage.is_some()
    }

    pub(crate) fn data(&self) -> Result<&[V]> {
        self.storage
            .as_ref()
            .map(Array::as_slice)
            .ok_or(ContainerError::NotAllocated)
    }

    pub(crate) fn data_mut(&mut self) -> Result<&mut [V]> {
        self.storage
            .as_mut()
            .map(Array::as_mut_slice)
            .ok_or(ContainerError::NotAllocated)
    }

    pub fn get(&self, idx: [isize; D]) -> Result<V> {
        let off = self.indexer.storage_index(idx)?;
        Ok(self.data()?[off])
    }

    pub fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        *self.get_mut(idx)? = value;
        Ok(())
    }

    pub fn get_mut(&mut self, idx: [isize; D]) -> Result<&mut V> {
        let off = self.indexer.storage_index(idx)?;
        let data = self.data_mut()?;
        Ok(&mut data[off])
    }

    /// Fill all storage, overlap included.
    pub fn set_value(&mut self, value: V) -> Result<()> {
        self.data_mut()?.fill(value);
        Ok(())
    }

    /// Flat storage buffer, if allocated.
    pub fn storage_array(&self) -> Option<&Array<V>> {
        self.storage.as_ref()
    }

    /// Read-only view of the flat storage.
    pub fn storage_view(&self) -> Result<ArrayView<'_, V>> {
        self.data().map(ArrayView::from_const)
    }

    /// Mutable view of the flat storage.
    pub fn storage_view_mut(&mut self) -> Result<ArrayView<'_, V>> {
        self.data_mut().map(ArrayView::from_mut)
    }

    /// Mutable N-dimensional view sharing this array's storage.
    pub fn view(&mut self) -> Result<NDArrayView<'_, V, D>> {
        let indexer = self.indexer;
        let data = self.data_mut()?;
        Ok(NDArrayView::new(indexer, [0; D], ViewData::Mut(data)))
    }

    /// Read-only N-dimensional view sharing this array's storage.
    pub fn const_view(&self) -> Result<NDArrayView<'_, V, D>> {
        let data = self.data()?;
        Ok(NDArrayView::new(self.indexer, [0; D], ViewData::Const(data)))
    }

    fn domain(&self) -> Domain<D> {
        Domain::whole(*self.sizes())
    }

    /// Call `f` for every index in `[0, sizes)`.
    pub fn for_all<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::All, f);
    }

    /// Call `f` for every index with `1 <= idx[d] <= sizes[d] - 2`.
    pub fn for_interior<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::Interior, f);
    }

    /// Call `f` for every index in `[0, sizes)` outside the interior.
    pub fn for_boundary<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::Boundary, f);
    }

    /// Like [`for_all`](Self::for_all), with mutable access to the element at each index.
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
        let indexer = self.indexer;
        let domain = self.domain();
        let data = self.data_mut()?;
        traversal::for_each_element_mut(&indexer, [0; D], data, domain, region, f);
        Ok(())
    }

    /// Read-only buffer descriptor; the pointer addresses index zero.
    pub fn buffer_info(&self) -> Result<BufferInfo<'_>> {
        let data = self.data()?;
        Ok(super::describe(&self.indexer, data.as_ptr()))
    }
}

impl<V: Element, const D: usize> NDArrayAccess<V, D> for NDArray<V, D> {
    fn indexer(&self) -> &Indexer<D> {
        &self.indexer
    }

    fn owned_range(&self) -> ([isize; D], [isize; D]) {
        ([0; D], self.sizes().map(|s| s as isize))
    }

    fn get(&self, idx: [isize; D]) -> Result<V> {
        NDArray::get(self, idx)
    }

    fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        NDArray::set(self, idx, value)
    }
}

impl<V: Element, const D: usize> DebugInvariants for NDArray<V, D> {
    const CONTEXT: &'static str = "NDArray";

    fn validate_invariants(&self) -> Result<()> {
        self.indexer.validate_invariants()?;
        if *self.indexer() != Indexer::row_major(*self.sizes(), *self.overlaps()) {
            return Err(ContainerError::Invariant(format!(
                "strides {:?} are not row-major",
                self.strides()
            )));
        }
        if let Some(a) = &self.storage {
            if a.size() != self.storage_size() {
                return Err(ContainerError::Invariant(format!(
                    "storage holds {} elements, indexer needs {}",
                    a.size(),
                    self.storage_size()
                )));
            }
        }
        Ok(())
    }
}

impl<V: Element, const D: usize> PartialEq for NDArray<V, D> {
    fn eq(&self, other: &Self) -> bool {
        logical_eq(self, other)
    }
}

impl<V: Element, const D: usize> fmt::Debug for NDArray<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NDArray")
            .field("indexer", &self.indexer)
            .field("allocated", &self.is_allocated())
            .finish()
    }
}

impl<V: Element, const D: usize> fmt::Display for NDArray<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_header(f, "NDArray", V::TYPE.rust_name(), self.sizes())
    }
}
