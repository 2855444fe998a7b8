//! Indexer: strided N-dimensional addressing with overlap (ghost) regions.
//!
//! An `Indexer<D>` maps a logical multi-index `idx` to a flat storage offset
//!
//! ```text
//! offset = Σ_d (idx[d] + overlaps[d]) * strides[d]
//! ```
//!
//! where each component is admissible iff
//! `-overlaps[d] <= idx[d] < sizes[d] + overlaps[d]`. The overlap shifts
//! logical coordinates so that ghost cells live at negative indices and past
//! the end of each axis, while storage offsets stay non-negative.
//!
//! Indexers are small `Copy` values and hold no element data; they are rebuilt
//! whenever the shape or overlaps change.

use serde::{Deserialize, Serialize};

use crate::container_error::{ContainerError, Result};
use crate::debug_invariants::DebugInvariants;

/// Addressing descriptor for a `D`-dimensional array.
///
/// # Invariants
/// - [`storage_size`](Self::storage_size) is `Π (sizes[d] + 2*overlaps[d])`,
///   or `0` if any `sizes[d] == 0`.
/// - For indexers built by [`row_major`](Self::row_major), `storage_index` is
///   a bijection from the admissible index box onto `[0, storage_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indexer<const D: usize> {
    #[serde(with = "crate::containers::serde_array")]
    sizes: [usize; D],
    #[serde(with = "crate::containers::serde_array")]
    strides: [usize; D],
    #[serde(with = "crate::containers::serde_array")]
    overlaps: [usize; D],
}

impl<const D: usize> Default for Indexer<D> {
    fn default() -> Self {
        Self {
            sizes: [0; D],
            strides: [0; D],
            overlaps: [0; D],
        }
    }
}

impl<const D: usize> Indexer<D> {
    /// Indexer with explicit strides.
    pub fn new(sizes: [usize; D], strides: [usize; D], overlaps: [usize; D]) -> Self {
        Self {
            sizes,
            strides,
            overlaps,
        }
    }

    /// Indexer with canonical row-major strides (last axis fastest).
    pub fn row_major(sizes: [usize; D], overlaps: [usize; D]) -> Self {
        let mut strides = [0; D];
        let mut acc = 1usize;
        for d in (0..D).rev() {
            strides[d] = acc;
            acc = acc.saturating_mul(sizes[d] + 2 * overlaps[d]);
        }
        Self {
            sizes,
            strides,
            overlaps,
        }
    }

    /// Number of axes.
    #[inline]
    pub const fn dimension() -> usize {
        D
    }

    #[inline]
    pub fn sizes(&self) -> &[usize; D] {
        &self.sizes
    }

    #[inline]
    pub fn strides(&self) -> &[usize; D] {
        &self.strides
    }

    #[inline]
    pub fn overlaps(&self) -> &[usize; D] {
        &self.overlaps
    }

    /// Storage extent of axis `d`, overlap included.
    #[inline]
    pub fn extent(&self, d: usize) -> usize {
        self.sizes[d] + 2 * self.overlaps[d]
    }

    /// Number of storage slots, overlap included; `0` if any axis is empty.
    pub fn storage_size(&self) -> usize {
        if self.sizes.iter().any(|&s| s == 0) {
            return 0;
        }
        (0..D).map(|d| self.extent(d)).product()
    }

    /// Admissible interval `[lower, upper)` of axis `d`.
    #[inline]
    pub fn bounds(&self, d: usize) -> (isize, isize) {
        let ov = self.overlaps[d] as isize;
        (-ov, self.sizes[d] as isize + ov)
    }

    /// Whether every component of `idx` is admissible.
    pub fn contains(&self, idx: &[isize; D]) -> bool {
        idx.iter().enumerate().all(|(d, &i)| {
            let (lo, hi) = self.bounds(d);
            self.sizes[d] > 0 && lo <= i && i < hi
        })
    }

    fn check_axis(&self, d: usize, i: isize) -> Result<()> {
        let (lower, upper) = self.bounds(d);
        if self.sizes[d] == 0 || i < lower || i >= upper {
            return Err(ContainerError::AxisOutOfBounds {
                axis: d,
                index: i,
                lower,
                upper,
            });
        }
        Ok(())
    }

    /// Offset of an index already known to be admissible.
    #[inline]
    pub(crate) fn offset_unchecked(&self, idx: &[isize; D]) -> usize {
        let mut off = 0usize;
        for d in 0..D {
            off += (idx[d] + self.overlaps[d] as isize) as usize * self.strides[d];
        }
        off
    }

    /// Flat storage offset of `idx`.
    ///
    /// # Errors
    /// [`ContainerError::AxisOutOfBounds`] naming the first offending axis.
    pub fn storage_index(&self, idx: [isize; D]) -> Result<usize> {
        for (d, &i) in idx.iter().enumerate() {
            self.check_axis(d, i)?;
        }
        Ok(self.offset_unchecked(&idx))
    }

    /// Offset of `idx` for an indexer whose index zero sits at `origin`.
    ///
    /// Errors report the bounds in the shifted coordinates the caller uses.
    pub fn storage_index_shifted(&self, origin: &[isize; D], idx: [isize; D]) -> Result<usize> {
        let mut local = idx;
        for d in 0..D {
            local[d] -= origin[d];
            if self.check_axis(d, local[d]).is_err() {
                let (lower, upper) = self.bounds(d);
                return Err(ContainerError::AxisOutOfBounds {
                    axis: d,
                    index: idx[d],
                    lower: lower + origin[d],
                    upper: upper + origin[d],
                });
            }
        }
        Ok(self.offset_unchecked(&local))
    }

    /// [`storage_index`](Self::storage_index) with the arity checked at run time.
    pub fn storage_index_dyn(&self, idx: &[isize]) -> Result<usize> {
        self.storage_index(to_fixed(idx)?)
    }

    /// Logical index stored at `offset`, for row-major indexers.
    pub(crate) fn index_of_offset(&self, mut offset: usize) -> [isize; D] {
        let mut idx = [0isize; D];
        for d in (0..D).rev() {
            let ext = self.extent(d);
            idx[d] = (offset % ext) as isize - self.overlaps[d] as isize;
            offset /= ext;
        }
        idx
    }

    /// Whether the box `[begins, ends)` occupies one contiguous run of storage.
    ///
    /// True iff there is an axis `k` such that every faster axis (`d > k`)
    /// spans its full extent `sizes[d] + 2*overlaps[d]` and every slower axis
    /// (`d < k`) spans exactly one index. Empty or out-of-bounds boxes are
    /// never contiguous.
    pub fn is_contiguous_block(&self, begins: [isize; D], ends: [isize; D]) -> bool {
        let mut spans = [0usize; D];
        for d in 0..D {
            let (lo, hi) = self.bounds(d);
            if begins[d] < lo || ends[d] > hi || begins[d] >= ends[d] {
                return false;
            }
            spans[d] = (ends[d] - begins[d]) as usize;
        }
        (0..D).any(|k| {
            (k + 1..D).all(|d| spans[d] == self.extent(d)) && (0..k).all(|d| spans[d] == 1)
        })
    }

    /// [`is_contiguous_block`](Self::is_contiguous_block) over slices.
    ///
    /// # Errors
    /// [`ContainerError::ShapeMismatch`] if the slices differ in length, and
    /// [`ContainerError::ArgumentCount`] if their length is not `D`.
    pub fn is_contiguous_block_dyn(&self, begins: &[isize], ends: &[isize]) -> Result<bool> {
        if begins.len() != ends.len() {
            return Err(ContainerError::ShapeMismatch {
                expected: begins.len(),
                found: ends.len(),
            });
        }
        Ok(self.is_contiguous_block(to_fixed(begins)?, to_fixed(ends)?))
    }
}

/// Convert a runtime-length index into `[isize; D]`.
pub(crate) fn to_fixed<const D: usize>(idx: &[isize]) -> Result<[isize; D]> {
    idx.try_into().map_err(|_| ContainerError::ArgumentCount {
        expected: D,
        found: idx.len(),
    })
}

impl<const D: usize> DebugInvariants for Indexer<D> {
    const CONTEXT: &'static str = "Indexer";

    fn validate_invariants(&self) -> Result<()> {
        // Strides must keep every admissible offset inside storage.
        if self.storage_size() == 0 {
            return Ok(());
        }
        let last = (0..D).fold(0usize, |acc, d| acc + (self.extent(d) - 1) * self.strides[d]);
        if last >= self.storage_size() {
            return Err(ContainerError::Invariant(format!(
                "indexer strides {:?} address offset {last} beyond storage size {}",
                self.strides,
                self.storage_size()
            )));
        }
        Ok(())
    }
}
