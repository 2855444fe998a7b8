//! Zero-copy buffer descriptors for external numeric-array consumers.
//!
//! A [`BufferInfo`] describes element type, shape and strides of a block of
//! memory owned by a container. It borrows the container, so the pointer it
//! carries stays valid for as long as the descriptor is alive; resizing or
//! dropping the owner is impossible while a descriptor exists.

use std::marker::PhantomData;

use crate::containers::element::{Element, ElementType};

/// Shape/stride/pointer description of container memory.
#[derive(Debug, Clone)]
pub struct BufferInfo<'a> {
    ptr: *mut u8,
    element: ElementType,
    shape: Vec<usize>,
    strides: Vec<isize>,
    readonly: bool,
    _borrow: PhantomData<&'a [u8]>,
}

impl<'a> BufferInfo<'a> {
    /// Describe a read-only strided block whose first logical element is `first`.
    pub(crate) fn from_const<V: Element>(first: *const V, shape: Vec<usize>, strides: Vec<isize>) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            ptr: first as *mut u8,
            element: V::TYPE,
            shape,
            strides,
            readonly: true,
            _borrow: PhantomData,
        }
    }

    /// Describe a writable strided block whose first logical element is `first`.
    pub(crate) fn from_mut<V: Element>(first: *mut V, shape: Vec<usize>, strides: Vec<isize>) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            ptr: first as *mut u8,
            element: V::TYPE,
            shape,
            strides,
            readonly: false,
            _borrow: PhantomData,
        }
    }

    /// Pointer to the element at logical index zero.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr
    }

    /// Writable pointer, or `None` for read-only descriptors.
    pub fn as_mut_ptr(&self) -> Option<*mut u8> {
        (!self.readonly).then_some(self.ptr)
    }

    pub fn element_type(&self) -> ElementType {
        self.element
    }

    /// Struct-module style format character of the element type.
    pub fn format(&self) -> char {
        self.element.format_char()
    }

    /// Size of one element in bytes.
    pub fn item_size(&self) -> usize {
        self.element.size()
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides in elements.
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Strides in bytes.
    pub fn byte_strides(&self) -> Vec<isize> {
        let item = self.item_size() as isize;
        self.strides.iter().map(|s| s * item).collect()
    }

    /// Number of logical elements described.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }
}
