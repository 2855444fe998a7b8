//! Non-owning view of a [`DistributedNDArray`](super::DistributedNDArray).

use std::fmt;

use crate::container_error::Result;
use crate::containers::distributed::distribution::LocalRange;
use crate::containers::element::Element;
use crate::containers::ndarray::access::{NDArrayAccess, logical_eq};
use crate::containers::ndarray::{Indexer, NDArrayView};

/// Distributed view: global shape and local range over a borrowed local block.
#[derive(Debug)]
pub struct DistributedNDArrayView<'a, V, const D: usize> {
    global_sizes: [usize; D],
    range: LocalRange<D>,
    overlaps: [usize; D],
    local: NDArrayView<'a, V, D>,
}

impl<'a, V: Element, const D: usize> DistributedNDArrayView<'a, V, D> {
    pub(crate) fn new(
        global_sizes: [usize; D],
        range: LocalRange<D>,
        overlaps: [usize; D],
        local: NDArrayView<'a, V, D>,
    ) -> Self {
        Self {
            global_sizes,
            range,
            overlaps,
            local,
        }
    }

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

    pub fn local_storage_size(&self) -> usize {
        self.local.storage_size()
    }

    pub fn is_const(&self) -> bool {
        self.local.is_const()
    }

    pub fn get(&self, idx: [isize; D]) -> Result<V> {
        self.local.get(idx)
    }

    pub fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        self.local.set(idx, value)
    }

    pub fn set_value(&mut self, value: V) -> Result<()> {
        self.local.set_value(value)
    }

    /// Local block view addressed with global indices.
    pub fn local_view(&mut self) -> &mut NDArrayView<'a, V, D> {
        &mut self.local
    }

    pub fn const_local_view(&self) -> NDArrayView<'_, V, D> {
        self.local.const_view()
    }

    pub fn const_view(&self) -> DistributedNDArrayView<'_, V, D> {
        DistributedNDArrayView {
            global_sizes: self.global_sizes,
            range: self.range,
            overlaps: self.overlaps,
            local: self.local.const_view(),
        }
    }

    pub fn for_all<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        self.local.for_all(f);
    }

    pub fn for_interior<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        self.local.for_interior(f);
    }

    pub fn for_boundary<F>(&self, f: F)
    where
        F: Fn([isize; D]) + Sync + Send,
    {
        self.local.for_boundary(f);
    }

    pub fn for_all_mut<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn([isize; D], &mut V) + Sync + Send,
    {
        self.local.for_all_mut(f)
    }
}

impl<V: Element, const D: usize> NDArrayAccess<V, D> for DistributedNDArrayView<'_, V, D> {
    fn indexer(&self) -> &Indexer<D> {
        self.local.indexer()
    }

    fn owned_range(&self) -> ([isize; D], [isize; D]) {
        self.local.owned_range()
    }

    fn get(&self, idx: [isize; D]) -> Result<V> {
        self.local.get(idx)
    }

    fn set(&mut self, idx: [isize; D], value: V) -> Result<()> {
        self.local.set(idx, value)
    }
}

impl<V: Element, const D: usize> PartialEq for DistributedNDArrayView<'_, V, D> {
    fn eq(&self, other: &Self) -> bool {
        self.global_sizes == other.global_sizes && logical_eq(self, other)
    }
}

impl<V: Element, const D: usize> fmt::Display for DistributedNDArrayView<'_, V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::containers::ndarray::write_header(
            f,
            "DistributedNDArrayView",
            V::TYPE.rust_name(),
            &self.global_sizes,
        )
    }
}
