//! Segment layouts: how row capacities map onto flat slot storage.
//!
//! Every format stores each row in one contiguous run of slots; formats differ
//! only in how many slots (the row's *width*) they reserve for a row of a
//! given capacity:
//!
//! | layout          | width of row `r`                                   |
//! |-----------------|----------------------------------------------------|
//! | CSR             | `capacity[r]`                                      |
//! | Ellpack         | `max_r capacity[r]`                                |
//! | Sliced-Ellpack  | max capacity over the slice of `slice_size` rows holding `r` |
//!
//! Row offsets are the prefix sums of the widths.

use std::fmt::Debug;
use std::io::{Read, Write};
use std::ops::Range;

use crate::container_error::{ContainerError, Result};
use crate::io::wire::{self, WireKind};

/// Physical layout policy of a sparse matrix format.
pub trait SegmentLayout: Clone + Debug + Default + PartialEq + Send + Sync {
    /// Wire tag identifying the format in saved streams.
    const KIND: WireKind;

    /// Human-readable format name.
    fn name(&self) -> &'static str;

    /// Slots reserved per row for the given capacities.
    fn row_widths(&self, capacities: &[usize]) -> Vec<usize>;

    /// Write format parameters after the stream header.
    fn write_params<W: Write>(&self, _w: &mut W) -> Result<()> {
        Ok(())
    }

    /// Read format parameters written by [`write_params`](Self::write_params).
    fn read_params<R: Read>(_r: &mut R) -> Result<Self> {
        Ok(Self::default())
    }
}

/// Compressed sparse row: each row reserves exactly its capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Csr;

/// Ellpack: every row reserves the maximum capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ellpack;

/// Sliced Ellpack: rows are grouped into slices of `slice_size`; each slice
/// reserves its own maximum capacity per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlicedEllpack {
    slice_size: usize,
}

impl SlicedEllpack {
    pub const DEFAULT_SLICE_SIZE: usize = 32;

    /// Layout with `slice_size` rows per slice (at least one).
    pub fn new(slice_size: usize) -> Self {
        Self {
            slice_size: slice_size.max(1),
        }
    }

    pub fn slice_size(&self) -> usize {
        self.slice_size
    }
}

impl Default for SlicedEllpack {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLICE_SIZE)
    }
}

impl SegmentLayout for Csr {
    const KIND: WireKind = WireKind::Csr;

    fn name(&self) -> &'static str {
        "CSR"
    }

    fn row_widths(&self, capacities: &[usize]) -> Vec<usize> {
        capacities.to_vec()
    }
}

impl SegmentLayout for Ellpack {
    const KIND: WireKind = WireKind::Ellpack;

    fn name(&self) -> &'static str {
        "Ellpack"
    }

    fn row_widths(&self, capacities: &[usize]) -> Vec<usize> {
        let width = capacities.iter().copied().max().unwrap_or(0);
        vec![width; capacities.len()]
    }
}

impl SegmentLayout for SlicedEllpack {
    const KIND: WireKind = WireKind::SlicedEllpack;

    fn name(&self) -> &'static str {
        "SlicedEllpack"
    }

    fn row_widths(&self, capacities: &[usize]) -> Vec<usize> {
        capacities
            .chunks(self.slice_size)
            .flat_map(|slice| {
                let width = slice.iter().copied().max().unwrap_or(0);
                std::iter::repeat_n(width, slice.len())
            })
            .collect()
    }

    fn write_params<W: Write>(&self, w: &mut W) -> Result<()> {
        wire::write_u64(w, self.slice_size as u64)
    }

    fn read_params<R: Read>(r: &mut R) -> Result<Self> {
        match wire::read_count(r)? {
            0 => Err(ContainerError::Format("slice size must be positive".into())),
            n => Ok(Self::new(n)),
        }
    }
}

/// Row offsets into flat slot storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    offsets: Vec<usize>,
}

impl Default for Segments {
    fn default() -> Self {
        Self { offsets: vec![0] }
    }
}

impl Segments {
    /// Prefix sums of `widths`.
    ///
    /// # Errors
    /// [`ContainerError::SlotOverflow`] if the total does not fit in `usize`.
    pub fn from_widths(widths: &[usize]) -> Result<Self> {
        let mut offsets = Vec::with_capacity(widths.len() + 1);
        offsets.push(0);
        let mut acc = 0usize;
        for (row, &w) in widths.iter().enumerate() {
            acc = acc.checked_add(w).ok_or_else(|| {
                ContainerError::SlotOverflow(format!("slot count overflows at row {row}"))
            })?;
            offsets.push(acc);
        }
        Ok(Self { offsets })
    }

    pub fn rows(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Slot range of `row`.
    #[inline]
    pub fn range(&self, row: usize) -> Range<usize> {
        self.offsets[row]..self.offsets[row + 1]
    }

    #[inline]
    pub fn width(&self, row: usize) -> usize {
        self.offsets[row + 1] - self.offsets[row]
    }

    /// Total reserved slots.
    pub fn allocated(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    /// `rows + 1` row offsets.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPS: [usize; 4] = [1, 3, 2, 0];

    #[test]
    fn csr_reserves_exact_capacity() {
        let seg = Segments::from_widths(&Csr.row_widths(&CAPS)).unwrap();
        assert_eq!(seg.offsets(), &[0, 1, 4, 6, 6]);
        assert_eq!(seg.allocated(), 6);
        assert_eq!(seg.range(1), 1..4);
    }

    #[test]
    fn ellpack_reserves_max_width() {
        let seg = Segments::from_widths(&Ellpack.row_widths(&CAPS)).unwrap();
        assert_eq!(seg.allocated(), 12);
        assert_eq!(seg.width(3), 3);
    }

    #[test]
    fn sliced_ellpack_reserves_per_slice() {
        let layout = SlicedEllpack::new(2);
        assert_eq!(layout.row_widths(&CAPS), vec![3, 3, 2, 2]);
        let seg = Segments::from_widths(&layout.row_widths(&CAPS)).unwrap();
        assert_eq!(seg.allocated(), 10);
        assert_eq!(SlicedEllpack::default().slice_size(), 32);
        assert_eq!(SlicedEllpack::new(0).slice_size(), 1);
    }

    #[test]
    fn empty_layouts() {
        let seg = Segments::from_widths(&Ellpack.row_widths(&[])).unwrap();
        assert_eq!(seg.rows(), 0);
        assert_eq!(seg.allocated(), 0);
        assert_eq!(Segments::default().allocated(), 0);
    }

    #[test]
    fn overflowing_widths_are_rejected() {
        let e = Segments::from_widths(&[usize::MAX, 1]).unwrap_err();
        assert!(matches!(e, ContainerError::SlotOverflow(_)));
        let ell = Ellpack.row_widths(&[usize::MAX / 2, 0, 0]);
        assert!(Segments::from_widths(&ell).is_err());
    }

    #[test]
    fn sliced_params_roundtrip() {
        let mut buf = Vec::new();
        SlicedEllpack::new(4).write_params(&mut buf).unwrap();
        let back = SlicedEllpack::read_params(&mut &buf[..]).unwrap();
        assert_eq!(back.slice_size(), 4);
        let zero = 0u64.to_le_bytes();
        assert!(SlicedEllpack::read_params(&mut &zero[..]).is_err());
    }
}
