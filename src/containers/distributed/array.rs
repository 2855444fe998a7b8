//! DistributedNDArray: one rank's block of a globally indexed array.
//!
//! The array stores the global shape and the half-open local range it owns.
//! Element access uses **global** indices; an index is accessible iff on every
//! axis `begin - overlap <= idx < end + overlap`. Storage is a plain
//! [`NDArray`] of the local extents (plus overlap layers).
//!
//! Cross-rank concerns (agreeing on ranges, halo exchange, reductions) belong
//! to the caller's communication layer.

use std::fmt;

use crate::container_error::{ContainerError, Result};
use crate::containers::array_view::ViewData;
use crate::containers::distributed::distribution::LocalRange;
use crate::containers::distributed::view::DistributedNDArrayView;
use crate::containers::element::Element;
use crate::containers::ndarray::access::{NDArrayAccess, logical_eq};
use crate::containers::ndarray::traversal::{self, Domain, Region};
use crate::containers::ndarray::{Indexer, NDArray, NDArrayView};
use crate::debug_invariants::DebugInvariants;

/// Locally owned block of a distributed `D`-dimensional array.
///
/// # Invariants
/// - `0 <= local_begins[d] <= local_ends[d] <= global_sizes[d]`.
/// - The local array's sizes are `local_ends - local_begins` and its overlaps
///   equal `overlaps`.
#[derive(Clone)]
pub struct DistributedNDArray<V, const D: usize> {
    global_sizes: [usize; D],
    range: LocalRange<D>,
    overlaps: [usize; D],
    local: NDArray<V, D>,
}

impl<V: Element, const D: usize> Default for DistributedNDArray<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Element, const D: usize> DistributedNDArray<V, D> {
    pub fn new() -> Self {
        Self {
            global_sizes: [0; D],
            range: LocalRange::default(),
            overlaps: [0; D],
            local: NDArray::new(),
        }
    }

    /// Set the global shape. The local range is reset to empty.
    pub fn set_sizes(&mut self, global: [usize; D]) {
        self.global_sizes = global;
        self.range = LocalRange::default();
        self.local.set_sizes([0; D]);
    }

    pub fn set_overlaps(&mut self, overlaps: [usize; D]) {
        self.overlaps = overlaps;
        self.local.set_overlaps(overlaps);
    }

    /// Assign the locally owned range `[begins, ends)`.
    ///
    /// # Errors
    /// [`ContainerError::InvalidDistribution`] unless
    /// `begins[d] <= ends[d] <= global_sizes[d]` on every axis; the array is
    /// left unchanged.
    pub fn set_distribution(&mut self, begins: [usize; D], ends: [usize; D]) -> Result<()> {
        self.set_local_range(LocalRange::new(begins, ends))
    }

    /// [`set_distribution`](Self::set_distribution) from a [`LocalRange`].
    ///
    /// Local storage is released whenever the range changes.
    pub fn set_local_range(&mut self, range: LocalRange<D>) -> Result<()> {
        range.validate(&self.global_sizes)?;
        if range != self.range {
            self.local.release();
        }
        self.range = range;
        self.local.set_sizes(range.extents());
        log::debug!(
            "distributed array with global sizes {:?} owns [{:?}, {:?})",
            self.global_sizes,
            range.begins,
            range.ends
        );
        Ok(())
    }

    /// Allocate local storage for the current range and overlaps.
    pub fn allocate(&mut self) {
        self.local.allocate();
        self.debug_assert_invariants();
    }

    /// Copy global shape, range and overlaps; allocate iff `other` is allocated.
    pub fn set_like(&mut self, other: &Self) {
        self.global_sizes = other.global_sizes;
        self.range = other.range;
        self.overlaps = other.overlaps;
        self.local.set_like(&other.local);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Global shape.
    pub fn sizes(&self) -> &[usize; D] {
        &self.global_sizes
    }

    pub fn local_begins(&self) -> &[usize; D] {
        &self.range.begins
    }

    pub fn local_ends(&self) -> &[usize; D] {
        &self.range.ends
    }

    pub fn local_range(&self) -> LocalRange<D> {
        self.range
    }

    pub fn overlaps(&self) -> &[usize; D] {
        &self.overlaps
    }

    /// Storage size of the local block, overlap included; 0 until allocated.
    pub fn local_storage_size(&self) -> usize {
        if self.local.is_allocated() {
            self.local.storage_size()
        } else {
            0
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.local.is_allocated()
    }

    /// The local block, addressed with local indices.
    pub fn local_array(&self) -> &NDArray<V, D> {
        &self.local
    }

    fn origin(&self) -> [isize; D] {
        self.range.begins.map(|b| b as isize)
    }

    /// Local storage offset of global index `idx`.
    pub fn storage_index(&self, idx: [isize; D]) -> Result<usize> {
        self.local
            .indexer()
            .storage_index_shifted(&self.origin(), idx)
    }

    pub fn get(&self, idx: [isize; D]) -> Result<V> {
        let off = self.storage_index(idx)?;
        Ok(self.local.data()?[off])
    }

    pub fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        let local = self.to_local(idx)?;
        self.local.set(local, value)
    }

    pub fn get_mut(&mut self, idx: [isize; D]) -> Result<&mut V> {
        let local = self.to_local(idx)?;
        self.local.get_mut(local)
    }

    fn to_local(&self, idx: [isize; D]) -> Result<[isize; D]> {
        self.storage_index(idx)?;
        let origin = self.origin();
        let mut local = idx;
        for d in 0..D {
            local[d] -= origin[d];
        }
        Ok(local)
    }

    /// Fill local storage, overlap included.
    pub fn set_value(&mut self, value: V) -> Result<()> {
        self.local.set_value(value)
    }

    /// Mutable view of the local block addressed with global indices.
    pub fn local_view(&mut self) -> Result<NDArrayView<'_, V, D>> {
        let origin = self.origin();
        let global = self.global_sizes;
        let indexer = *self.local.indexer();
        let data = self.local.data_mut()?;
        Ok(NDArrayView::new(indexer, origin, ViewData::Mut(data)).with_global_sizes(global))
    }

    /// Read-only view of the local block addressed with global indices.
    pub fn const_local_view(&self) -> Result<NDArrayView<'_, V, D>> {
        let data = self.local.data()?;
        Ok(
            NDArrayView::new(*self.local.indexer(), self.origin(), ViewData::Const(data))
                .with_global_sizes(self.global_sizes),
        )
    }

    /// Mutable distributed view.
    pub fn view(&mut self) -> Result<DistributedNDArrayView<'_, V, D>> {
        let global = self.global_sizes;
        let range = self.range;
        let overlaps = self.overlaps;
        Ok(DistributedNDArrayView::new(
            global,
            range,
            overlaps,
            self.local_view()?,
        ))
    }

    /// Read-only distributed view.
    pub fn const_view(&self) -> Result<DistributedNDArrayView<'_, V, D>> {
        Ok(DistributedNDArrayView::new(
            self.global_sizes,
            self.range,
            self.overlaps,
            self.const_local_view()?,
        ))
    }

    fn domain(&self) -> Domain<D> {
        Domain {
            begins: self.origin(),
            ends: self.range.ends.map(|e| e as isize),
            sizes: self.global_sizes,
        }
    }

    /// Call `f` for every locally owned global index.
    pub fn for_all<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::All, f);
    }

    /// Call `f` for every locally owned index in the global interior.
    pub fn for_interior<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        traversal::for_each_index(self.domain(), Region::Interior, f);
    }

    /// Call `f` for every locally owned index on the global boundary.
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
        self.local_view()?.for_all_mut(f)
    }

    pub fn for_interior_mut<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        self.local_view()?.for_interior_mut(f)
    }

    pub fn for_boundary_mut<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        self.local_view()?.for_boundary_mut(f)
    }
}

impl<V: Element, const D: usize> NDArrayAccess<V, D> for DistributedNDArray<V, D> {
    fn indexer(&self) -> &Indexer<D> {
        self.local.indexer()
    }

    fn owned_range(&self) -> ([isize; D], [isize; D]) {
        (self.origin(), self.range.ends.map(|e| e as isize))
    }

    fn get(&self, idx: [isize; D]) -> Result<V> {
        DistributedNDArray::get(self, idx)
    }

    fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        DistributedNDArray::set(self, idx, value)
    }
}

impl<V: Element, const D: usize> DebugInvariants for DistributedNDArray<V, D> {
    const CONTEXT: &'static str = "DistributedNDArray";

    fn validate_invariants(&self) -> Result<()> {
        self.range.validate(&self.global_sizes)?;
        if *self.local.sizes() != self.range.extents() || *self.local.overlaps() != self.overlaps {
            return Err(ContainerError::Invariant(format!(
                "local block {:?}/{:?} does not match range extents {:?}/{:?}",
                self.local.sizes(),
                self.local.overlaps(),
                self.range.extents(),
                self.overlaps
            )));
        }
        self.local.validate_invariants()
    }
}

impl<V: Element, const D: usize> PartialEq for DistributedNDArray<V, D> {
    fn eq(&self, other: &Self) -> bool {
        self.global_sizes == other.global_sizes && logical_eq(self, other)
    }
}

impl<V: Element, const D: usize> fmt::Debug for DistributedNDArray<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributedNDArray")
            .field("global_sizes", &self.global_sizes)
            .field("range", &self.range)
            .field("overlaps", &self.overlaps)
            .field("allocated", &self.is_allocated())
            .finish()
    }
}

impl<V: Element, const D: usize> fmt::Display for DistributedNDArray<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::containers::ndarray::write_header(
            f,
            "DistributedNDArray",
            V::TYPE.rust_name(),
            &self.global_sizes,
        )
    }
}
