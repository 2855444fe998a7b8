//! Array: owned, contiguous, resizable block of homogeneous elements.
//!
//! `Array<V, S>` is the storage buffer every other container is built on. It
//! couples a [`Storage`] backend with bounds-checked element access, bulk
//! fill, resizing, and a binary `save`/`load` round trip.
//!
//! Sizes and indices are signed (`isize`) on purpose: callers coming from
//! signed index arithmetic get a [`ContainerError::NegativeSize`] or
//! [`ContainerError::IndexOutOfBounds`] instead of a wrapped `usize`.

use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut, Range};

use itertools::Itertools;

use crate::container_error::{ContainerError, Result};
use crate::containers::array_view::ArrayView;
use crate::containers::buffer::BufferInfo;
use crate::containers::element::Element;
use crate::containers::storage::{Storage, VecStorage};
use crate::io::wire::{self, WireKind};

/// Convert a signed size to `usize`, rejecting negatives.
#[inline]
pub(crate) fn checked_size(n: isize) -> Result<usize> {
    usize::try_from(n).map_err(|_| ContainerError::NegativeSize(n))
}

/// Convert a signed element index to `usize`, rejecting anything outside `[0, size)`.
#[inline]
pub(crate) fn checked_index(i: isize, size: usize) -> Result<usize> {
    match usize::try_from(i) {
        Ok(u) if u < size => Ok(u),
        _ => Err(ContainerError::IndexOutOfBounds { index: i, size }),
    }
}

/// Resolve a `[begin, end)` fill range where `end == 0` means "through `size`".
pub(crate) fn fill_range(begin: isize, end: isize, size: usize) -> Result<Range<usize>> {
    let err = || ContainerError::InvalidRange { begin, end, size };
    let b = usize::try_from(begin).map_err(|_| err())?;
    let e = if end == 0 {
        size
    } else {
        usize::try_from(end).map_err(|_| err())?
    };
    if b > e || e > size {
        // `set_value(v, k, 0)` with `k > size` is still an error, but an empty
        // array with begin == 0 is fine.
        return Err(err());
    }
    Ok(b..e)
}

/// Owned storage buffer.
#[derive(Clone)]
pub struct Array<V, S = VecStorage<V>> {
    storage: S,
    _marker: PhantomData<V>,
}

impl<V: Element, S: Storage<V>> Array<V, S> {
    /// Empty array.
    pub fn new() -> Self {
        Self {
            storage: S::with_len(0, V::default()),
            _marker: PhantomData,
        }
    }

    /// Array of `size` value-initialized elements.
    pub fn with_size(size: isize) -> Result<Self> {
        Self::with_value(size, V::default())
    }

    /// Array of `size` copies of `value`.
    pub fn with_value(size: isize, value: V) -> Result<Self> {
        let n = checked_size(size)?;
        Ok(Self {
            storage: S::with_len(n, value),
            _marker: PhantomData,
        })
    }

    /// Copy a slice into a new array.
    pub fn from_slice(values: &[V]) -> Self {
        let mut storage = S::with_len(values.len(), V::default());
        storage.as_mut_slice().copy_from_slice(values);
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Whether the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Set the number of elements.
    ///
    /// Previous content is discarded when the size changes; the new elements
    /// are value-initialized. Setting the current size is a no-op.
    ///
    /// # Errors
    /// [`ContainerError::NegativeSize`] if `size < 0`; the array is unchanged.
    pub fn set_size(&mut self, size: isize) -> Result<()> {
        let n = checked_size(size)?;
        if n != self.size() {
            self.storage.resize(0, V::default());
            self.storage.resize(n, V::default());
        }
        Ok(())
    }

    /// Resize, preserving the common prefix; new elements are value-initialized.
    pub fn resize(&mut self, size: isize) -> Result<()> {
        self.resize_with_value(size, V::default())
    }

    /// Resize, preserving the common prefix; new elements are set to `value`.
    pub fn resize_with_value(&mut self, size: isize, value: V) -> Result<()> {
        let n = checked_size(size)?;
        self.storage.resize(n, value);
        Ok(())
    }

    /// Drop all elements and release the allocation.
    pub fn reset(&mut self) {
        self.storage.resize(0, V::default());
    }

    /// Exchange contents with `other` without copying elements.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.storage, &mut other.storage);
    }

    /// Deep-copy size and contents from `other`.
    pub fn assign<S2: Storage<V>>(&mut self, other: &Array<V, S2>) {
        if self.size() != other.size() {
            self.storage.resize(0, V::default());
            self.storage.resize(other.size(), V::default());
        }
        self.storage.as_mut_slice().copy_from_slice(other.as_slice());
    }

    /// Take the size of `other` (content unspecified, as with [`set_size`](Self::set_size)).
    pub fn set_like<S2: Storage<V>>(&mut self, other: &Array<V, S2>) {
        if self.size() != other.size() {
            self.storage.resize(0, V::default());
            self.storage.resize(other.size(), V::default());
        }
    }

    /// Bounds-checked read.
    #[inline]
    pub fn get(&self, i: isize) -> Result<V> {
        let u = checked_index(i, self.size())?;
        Ok(self.storage.as_slice()[u])
    }

    /// Bounds-checked write.
    #[inline]
    pub fn set(&mut self, i: isize, value: V) -> Result<()> {
        let u = checked_index(i, self.size())?;
        self.storage.as_mut_slice()[u] = value;
        Ok(())
    }

    /// Fill `[begin, end)` with `value`; `end == 0` means "through the current size".
    pub fn set_value(&mut self, value: V, begin: isize, end: isize) -> Result<()> {
        let range = fill_range(begin, end, self.size())?;
        self.storage.as_mut_slice()[range].fill(value);
        Ok(())
    }

    /// Fill every element with `value`.
    pub fn fill(&mut self, value: V) {
        self.storage.as_mut_slice().fill(value);
    }

    #[inline]
    pub fn as_slice(&self) -> &[V] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        self.storage.as_mut_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, V> {
        self.as_mut_slice().iter_mut()
    }

    /// Backend holding the elements.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable view sharing this array's memory.
    pub fn view(&mut self) -> ArrayView<'_, V> {
        ArrayView::from_mut(self.storage.as_mut_slice())
    }

    /// Read-only view sharing this array's memory.
    pub fn const_view(&self) -> ArrayView<'_, V> {
        ArrayView::from_const(self.storage.as_slice())
    }

    /// Raw bytes of the payload (native byte order).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Read-only one-dimensional buffer descriptor.
    pub fn buffer_info(&self) -> BufferInfo<'_> {
        BufferInfo::from_const(self.as_slice().as_ptr(), vec![self.size()], vec![1])
    }

    /// Writable one-dimensional buffer descriptor.
    pub fn buffer_info_mut(&mut self) -> BufferInfo<'_> {
        let n = self.size();
        BufferInfo::from_mut(self.as_mut_slice().as_mut_ptr(), vec![n], vec![1])
    }

    /// Type string written by [`save`](Self::save), e.g. `Array<f64>`.
    pub fn serialization_type() -> String {
        format!("Array<{}>", V::TYPE.rust_name())
    }

    /// Write header, size and little-endian payload.
    pub fn save<W: Write>(&self, w: &mut W) -> Result<()> {
        wire::write_header::<_, V>(w, WireKind::Array)?;
        wire::write_u64(w, self.size() as u64)?;
        wire::write_elements(w, self.as_slice())
    }

    /// Replace contents with an array read from `r`.
    ///
    /// # Errors
    /// [`ContainerError::Format`] for a foreign or corrupt header,
    /// [`ContainerError::Io`] for a truncated stream. On error `self` is unchanged.
    pub fn load<R: Read>(&mut self, r: &mut R) -> Result<()> {
        let values = Self::read_payload(r)
            .inspect_err(|e| log::warn!("rejected {} stream: {e}", Self::serialization_type()))?;
        let mut storage = S::with_len(values.len(), V::default());
        storage.as_mut_slice().copy_from_slice(&values);
        self.storage = storage;
        log::debug!("loaded {} with {} elements", Self::serialization_type(), self.size());
        Ok(())
    }

    fn read_payload<R: Read>(r: &mut R) -> Result<Vec<V>> {
        wire::read_header::<_, V>(r, WireKind::Array)?;
        let n = wire::read_count(r)?;
        wire::read_elements(r, n)
    }
}

impl<V> Array<V, VecStorage<V>> {
    /// Unwrap into the backing `Vec`.
    pub fn into_vec(self) -> Vec<V> {
        self.storage.into_inner()
    }
}

impl<V: Element, S: Storage<V>> Default for Array<V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<Vec<V>> for Array<V, VecStorage<V>> {
    fn from(v: Vec<V>) -> Self {
        Self {
            storage: VecStorage::from(v),
            _marker: PhantomData,
        }
    }
}

impl<V> FromIterator<V> for Array<V, VecStorage<V>> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<V: Element, S: Storage<V>, S2: Storage<V>> PartialEq<Array<V, S2>> for Array<V, S> {
    fn eq(&self, other: &Array<V, S2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: Element, S: Storage<V>> Index<usize> for Array<V, S> {
    type Output = V;
    fn index(&self, i: usize) -> &V {
        &self.as_slice()[i]
    }
}

impl<V: Element, S: Storage<V>> IndexMut<usize> for Array<V, S> {
    fn index_mut(&mut self, i: usize) -> &mut V {
        &mut self.as_mut_slice()[i]
    }
}

impl<V: Element, S: Storage<V>> fmt::Debug for Array<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("type", &V::TYPE)
            .field("size", &self.size())
            .finish()
    }
}

impl<V: Element, S: Storage<V>> fmt::Display for Array<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().join(", "))
    }
}
