//! Non-owning handles onto a contiguous run of elements.

use std::fmt;

use itertools::Itertools;

use crate::container_error::{ContainerError, Result};
use crate::containers::array::{Array, checked_index, fill_range};
use crate::containers::buffer::BufferInfo;
use crate::containers::element::Element;

/// Borrowed element data, either shared (read-only) or exclusive.
#[derive(Debug)]
pub(crate) enum ViewData<'a, V> {
    Const(&'a [V]),
    Mut(&'a mut [V]),
}

impl<'a, V> ViewData<'a, V> {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[V] {
        match self {
            ViewData::Const(s) => *s,
            ViewData::Mut(s) => &**s,
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> Result<&mut [V]> {
        match self {
            ViewData::Const(_) => Err(ContainerError::ReadOnlyView),
            ViewData::Mut(s) => Ok(&mut **s),
        }
    }

    #[inline]
    pub(crate) fn is_const(&self) -> bool {
        matches!(self, ViewData::Const(_))
    }

    /// Read-only reborrow.
    pub(crate) fn reborrow(&self) -> ViewData<'_, V> {
        ViewData::Const(self.as_slice())
    }
}

/// View of an [`Array`] (or any slice) sharing its memory.
///
/// A const view rejects writes at run time with
/// [`ContainerError::ReadOnlyView`]; a mutable view holds the exclusive borrow
/// of its origin for as long as it lives.
#[derive(Debug)]
pub struct ArrayView<'a, V> {
    data: ViewData<'a, V>,
}

impl<'a, V: Element> ArrayView<'a, V> {
    pub fn from_const(data: &'a [V]) -> Self {
        Self {
            data: ViewData::Const(data),
        }
    }

    pub fn from_mut(data: &'a mut [V]) -> Self {
        Self {
            data: ViewData::Mut(data),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether writes through this view are rejected.
    pub fn is_const(&self) -> bool {
        self.data.is_const()
    }

    pub fn get(&self, i: isize) -> Result<V> {
        let u = checked_index(i, self.size())?;
        Ok(self.data.as_slice()[u])
    }

    pub fn set(&mut self, i: isize, value: V) -> Result<()> {
        let n = self.size();
        let slice = self.data.as_mut_slice()?;
        let u = checked_index(i, n)?;
        slice[u] = value;
        Ok(())
    }

    /// Fill `[begin, end)` with `value`; `end == 0` means "through the view's size".
    pub fn set_value(&mut self, value: V, begin: isize, end: isize) -> Result<()> {
        let n = self.size();
        let slice = self.data.as_mut_slice()?;
        let range = fill_range(begin, end, n)?;
        slice[range].fill(value);
        Ok(())
    }

    pub fn as_slice(&self) -> &[V] {
        self.data.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [V]> {
        self.data.as_mut_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.as_slice().iter()
    }

    /// Read-only view of the same memory.
    pub fn const_view(&self) -> ArrayView<'_, V> {
        ArrayView {
            data: self.data.reborrow(),
        }
    }

    /// Deep copy into an owned array.
    pub fn to_array(&self) -> Array<V> {
        Array::from_slice(self.as_slice())
    }

    pub fn buffer_info(&self) -> BufferInfo<'_> {
        BufferInfo::from_const(self.as_slice().as_ptr(), vec![self.size()], vec![1])
    }
}

impl<V: Element> PartialEq for ArrayView<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: Element> PartialEq<Array<V>> for ArrayView<'_, V> {
    fn eq(&self, other: &Array<V>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: Element> fmt::Display for ArrayView<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().join(", "))
    }
}
