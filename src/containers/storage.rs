//! Backing buffers for [`Array`](crate::containers::array::Array).
//!
//! An array only needs a resizable, contiguous run of elements. [`VecStorage`]
//! provides it on the heap; `Array<V, S>` is generic over [`Storage`] so arrays
//! backed by different buffers can still be assigned to and compared with
//! each other.

use core::fmt::{self, Debug};

/// Resizable contiguous buffer of `V`.
pub trait Storage<V>: Debug {
    /// Buffer of `len` copies of `fill`.
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone;

    /// Current length in elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resize to `new_len`, keeping the prefix and filling new cells with `fill`.
    fn resize(&mut self, new_len: usize, fill: V)
    where
        V: Clone;

    fn as_slice(&self) -> &[V];

    fn as_mut_slice(&mut self) -> &mut [V];
}

/// `Vec`-backed storage (default).
#[derive(Clone, Default)]
pub struct VecStorage<V>(pub(crate) Vec<V>);

impl<V> Debug for VecStorage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecStorage")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<V> Storage<V> for VecStorage<V> {
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone,
    {
        Self(vec![fill; len])
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// Shrinking to zero also returns the allocation.
    fn resize(&mut self, new_len: usize, fill: V)
    where
        V: Clone,
    {
        self.0.resize(new_len, fill);
        if new_len == 0 {
            self.0.shrink_to_fit();
        }
    }

    fn as_slice(&self) -> &[V] {
        &self.0
    }

    fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.0
    }
}

impl<V> From<Vec<V>> for VecStorage<V> {
    fn from(v: Vec<V>) -> Self {
        Self(v)
    }
}

impl<V> VecStorage<V> {
    pub fn into_inner(self) -> Vec<V> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_preserves_prefix() {
        let mut s = VecStorage::from(vec![1, 2, 3]);
        s.resize(5, 9);
        assert_eq!(s.as_slice(), &[1, 2, 3, 9, 9]);
        s.resize(1, 0);
        assert_eq!(s.into_inner(), vec![1]);
    }

    #[test]
    fn resize_to_zero_releases_memory() {
        let mut s = VecStorage::with_len(64, 0u8);
        s.resize(0, 0);
        assert!(s.is_empty());
        assert_eq!(s.0.capacity(), 0);
    }
}
