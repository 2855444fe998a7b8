//! SparseMatrix: row-capacity planned sparse storage over a segment layout.
//!
//! A matrix moves through four states:
//!
//! ```text
//! Uninitialized --set_dimensions--> Dimensioned --set_row_capacities--> CapacityPlanned
//!                                                                          |
//!                                                   set_element/add_element v
//!                                                                       Populated
//! ```
//!
//! `set_dimensions` from any state returns to `Dimensioned` and drops
//! capacities and data. Reads of in-range positions return zero in every
//! state.
//!
//! Within a row, stored entries are sorted by column and occupy the first
//! `row_length` slots of the row's segment; the remaining slots hold
//! [`PADDING_INDEX`]. A row accepts at most its *planned* capacity of entries
//! in every format, even when the layout reserves more slots.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::container_error::{ContainerError, Result};
use crate::containers::element::Scalar;
use crate::debug_invariants::DebugInvariants;
use crate::io::wire;
use crate::matrices::row::SparseRow;
use crate::matrices::segments::{Csr, Ellpack, SegmentLayout, Segments, SlicedEllpack};

/// Column index stored in unused slots.
pub const PADDING_INDEX: usize = usize::MAX;

/// Lifecycle state of a [`SparseMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixState {
    Uninitialized,
    Dimensioned,
    CapacityPlanned,
    Populated,
}

impl MatrixState {
    fn tag(self) -> u64 {
        match self {
            MatrixState::Uninitialized => 0,
            MatrixState::Dimensioned => 1,
            MatrixState::CapacityPlanned => 2,
            MatrixState::Populated => 3,
        }
    }

    fn from_tag(tag: u64) -> Option<Self> {
        Some(match tag {
            0 => MatrixState::Uninitialized,
            1 => MatrixState::Dimensioned,
            2 => MatrixState::CapacityPlanned,
            3 => MatrixState::Populated,
            _ => return None,
        })
    }
}

/// Sparse matrix with values `V` in layout `L`.
#[derive(Debug, Clone)]
pub struct SparseMatrix<V, L> {
    layout: L,
    state: MatrixState,
    rows: usize,
    columns: usize,
    capacities: Vec<usize>,
    lengths: Vec<usize>,
    segments: Segments,
    column_indexes: Vec<usize>,
    values: Vec<V>,
}

pub type CsrMatrix<V> = SparseMatrix<V, Csr>;
pub type EllpackMatrix<V> = SparseMatrix<V, Ellpack>;
pub type SlicedEllpackMatrix<V> = SparseMatrix<V, SlicedEllpack>;

impl<V: Scalar, L: SegmentLayout> Default for SparseMatrix<V, L> {
    fn default() -> Self {
        Self::with_layout(L::default())
    }
}

impl<V: Scalar, L: SegmentLayout> SparseMatrix<V, L> {
    /// Uninitialized matrix with the default layout parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uninitialized matrix with explicit layout parameters.
    pub fn with_layout(layout: L) -> Self {
        Self {
            layout,
            state: MatrixState::Uninitialized,
            rows: 0,
            columns: 0,
            capacities: Vec::new(),
            lengths: Vec::new(),
            segments: Segments::default(),
            column_indexes: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Dimensioned `rows x columns` matrix.
    pub fn with_dimensions(rows: usize, columns: usize) -> Self {
        let mut m = Self::new();
        m.set_dimensions(rows, columns);
        m
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn state(&self) -> MatrixState {
        self.state
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Set the dimensions, dropping capacities and data.
    pub fn set_dimensions(&mut self, rows: usize, columns: usize) {
        self.rows = rows;
        self.columns = columns;
        self.capacities.clear();
        self.lengths.clear();
        self.segments = Segments::default();
        self.column_indexes = Vec::new();
        self.values = Vec::new();
        self.state = MatrixState::Dimensioned;
        log::debug!("{} matrix dimensioned {rows} x {columns}", self.layout.name());
    }

    /// Reserve `capacities[r]` entries for every row `r`; existing data is dropped.
    ///
    /// # Errors
    /// - [`ContainerError::ShapeMismatch`] if `capacities.len() != rows`.
    /// - [`ContainerError::SlotOverflow`] if the layout's slots cannot be
    ///   addressed or allocated.
    ///
    /// On error the matrix is left unchanged.
    pub fn set_row_capacities(&mut self, capacities: &[usize]) -> Result<()> {
        if capacities.len() != self.rows {
            return Err(ContainerError::ShapeMismatch {
                expected: self.rows,
                found: capacities.len(),
            });
        }
        self.plan(capacities.to_vec())
    }

    fn plan(&mut self, capacities: Vec<usize>) -> Result<()> {
        let segments = Segments::from_widths(&self.layout.row_widths(&capacities))?;
        let slots = segments.allocated();
        let column_indexes = filled(slots, PADDING_INDEX)?;
        let values = filled(slots, V::zero())?;
        self.segments = segments;
        self.column_indexes = column_indexes;
        self.values = values;
        self.lengths = vec![0; capacities.len()];
        self.capacities = capacities;
        self.state = MatrixState::CapacityPlanned;
        log::debug!(
            "{} matrix {} x {}: planned {} slots",
            self.layout.name(),
            self.rows,
            self.columns,
            slots
        );
        self.debug_assert_invariants();
        Ok(())
    }

    fn check_position(&self, row: usize, column: usize) -> Result<()> {
        if row >= self.rows {
            return Err(ContainerError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }
        if column >= self.columns {
            return Err(ContainerError::ColumnOutOfBounds {
                column,
                columns: self.columns,
            });
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(ContainerError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }
        Ok(())
    }

    fn has_capacities(&self) -> bool {
        matches!(
            self.state,
            MatrixState::CapacityPlanned | MatrixState::Populated
        )
    }

    /// Used slots of `row`.
    fn used(&self, row: usize) -> std::ops::Range<usize> {
        let start = self.segments.range(row).start;
        start..start + self.lengths[row]
    }

    /// Slot holding `column` in `row`, or the insertion position.
    fn locate(&self, row: usize, column: usize) -> std::result::Result<usize, usize> {
        let used = self.used(row);
        let start = used.start;
        self.column_indexes[used]
            .binary_search(&column)
            .map(|k| start + k)
            .map_err(|k| start + k)
    }

    /// Slot for `(row, column)`, inserting a zero entry if absent.
    fn slot_for_write(&mut self, row: usize, column: usize) -> Result<usize> {
        self.check_position(row, column)?;
        if !self.has_capacities() {
            return Err(ContainerError::CapacitiesNotSet);
        }
        match self.locate(row, column) {
            Ok(slot) => Ok(slot),
            Err(pos) => {
                if self.lengths[row] >= self.capacities[row] {
                    return Err(ContainerError::CapacityExceeded {
                        row,
                        capacity: self.capacities[row],
                    });
                }
                let end = self.used(row).end;
                self.column_indexes.copy_within(pos..end, pos + 1);
                self.values.copy_within(pos..end, pos + 1);
                self.column_indexes[pos] = column;
                self.values[pos] = V::zero();
                self.lengths[row] += 1;
                Ok(pos)
            }
        }
    }

    /// Store `value` at `(row, column)`.
    ///
    /// # Errors
    /// - [`ContainerError::RowOutOfBounds`] / [`ContainerError::ColumnOutOfBounds`].
    /// - [`ContainerError::CapacitiesNotSet`] before [`set_row_capacities`](Self::set_row_capacities).
    /// - [`ContainerError::CapacityExceeded`] if the entry is new and the row is full.
    pub fn set_element(&mut self, row: usize, column: usize, value: V) -> Result<()> {
        let slot = self.slot_for_write(row, column)?;
        self.values[slot] = value;
        self.state = MatrixState::Populated;
        Ok(())
    }

    /// Accumulate `coefficient * value` into `(row, column)`.
    ///
    /// An absent entry is treated as zero. Errors as for
    /// [`set_element`](Self::set_element).
    pub fn add_element(&mut self, row: usize, column: usize, value: V, coefficient: V) -> Result<()> {
        let slot = self.slot_for_write(row, column)?;
        self.values[slot] = self.values[slot] + coefficient * value;
        self.state = MatrixState::Populated;
        Ok(())
    }

    /// Value at `(row, column)`, zero if not stored.
    pub fn get_element(&self, row: usize, column: usize) -> Result<V> {
        self.check_position(row, column)?;
        if !self.has_capacities() {
            return Ok(V::zero());
        }
        Ok(self
            .locate(row, column)
            .map_or(V::zero(), |slot| self.values[slot]))
    }

    /// Number of stored entries.
    pub fn nonzero_elements_count(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Number of slots reserved by the layout.
    pub fn allocated_elements_count(&self) -> usize {
        self.segments.allocated()
    }

    /// Read view of `row`.
    pub fn row(&self, row: usize) -> Result<SparseRow<'_, V>> {
        self.check_row(row)?;
        if !self.has_capacities() {
            return Ok(SparseRow::new(row, 0, &[], &[]));
        }
        let used = self.used(row);
        Ok(SparseRow::new(
            row,
            self.capacities[row],
            &self.column_indexes[used.clone()],
            &self.values[used],
        ))
    }

    /// Iterator over all rows.
    pub fn row_iter(&self) -> impl Iterator<Item = SparseRow<'_, V>> + '_ {
        (0..self.rows).filter_map(move |r| self.row(r).ok())
    }

    /// Stored entries of `row`.
    pub fn row_length(&self, row: usize) -> Result<usize> {
        self.check_row(row)?;
        Ok(self.lengths.get(row).copied().unwrap_or(0))
    }

    /// Stored entries of every row.
    pub fn compressed_row_lengths(&self) -> Vec<usize> {
        if self.has_capacities() {
            self.lengths.clone()
        } else {
            vec![0; self.rows]
        }
    }

    /// Planned capacity of `row`.
    pub fn row_capacity(&self, row: usize) -> Result<usize> {
        self.check_row(row)?;
        Ok(self.capacities.get(row).copied().unwrap_or(0))
    }

    /// Planned capacities of every row, empty before planning.
    pub fn row_capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Largest number of stored entries in any row.
    pub fn max_row_length(&self) -> usize {
        self.lengths.iter().copied().max().unwrap_or(0)
    }

    pub fn padding_index(&self) -> usize {
        PADDING_INDEX
    }

    /// Take dimensions, layout parameters and capacities of `other`, without data.
    pub fn set_like<V2: Scalar>(&mut self, other: &SparseMatrix<V2, L>) -> Result<()> {
        self.layout = other.layout.clone();
        self.set_dimensions(other.rows, other.columns);
        if other.has_capacities() {
            self.plan(other.capacities.clone())?;
        }
        Ok(())
    }

    /// Return to the uninitialized state.
    pub fn reset(&mut self) {
        *self = Self::with_layout(self.layout.clone());
    }

    /// Shrink every row's capacity to its current length, keeping the entries.
    pub fn compress(&mut self) -> Result<()> {
        if !self.has_capacities() {
            return Ok(());
        }
        let entries: Vec<(Vec<usize>, Vec<V>)> = (0..self.rows)
            .map(|r| {
                let used = self.used(r);
                (
                    self.column_indexes[used.clone()].to_vec(),
                    self.values[used].to_vec(),
                )
            })
            .collect();
        let populated = self.state == MatrixState::Populated;
        self.plan(self.lengths.clone())?;
        for (r, (cols, vals)) in entries.into_iter().enumerate() {
            let start = self.segments.range(r).start;
            self.column_indexes[start..start + cols.len()].copy_from_slice(&cols);
            self.values[start..start + vals.len()].copy_from_slice(&vals);
            self.lengths[r] = cols.len();
        }
        if populated {
            self.state = MatrixState::Populated;
        }
        Ok(())
    }

    /// Write header, layout parameters, state, shape and stored entries.
    pub fn save<W: Write>(&self, w: &mut W) -> Result<()> {
        wire::write_header::<_, V>(w, L::KIND)?;
        self.layout.write_params(w)?;
        wire::write_u64(w, self.state.tag())?;
        wire::write_u64(w, self.rows as u64)?;
        wire::write_u64(w, self.columns as u64)?;
        if !self.has_capacities() {
            return Ok(());
        }
        wire::write_indices(w, &self.capacities)?;
        wire::write_indices(w, &self.lengths)?;
        let mut cols = Vec::with_capacity(self.nonzero_elements_count());
        let mut vals = Vec::with_capacity(self.nonzero_elements_count());
        for r in 0..self.rows {
            let used = self.used(r);
            cols.extend_from_slice(&self.column_indexes[used.clone()]);
            vals.extend_from_slice(&self.values[used]);
        }
        wire::write_indices(w, &cols)?;
        wire::write_elements(w, &vals)
    }

    /// Replace `self` with a matrix read from `r`.
    ///
    /// # Errors
    /// [`ContainerError::Format`] for a foreign format, element type or
    /// inconsistent content; [`ContainerError::Io`] for a truncated stream.
    /// On error `self` is unchanged.
    pub fn load<R: Read>(&mut self, r: &mut R) -> Result<()> {
        let loaded = Self::read_from(r)
            .inspect_err(|e| log::warn!("rejected {} stream: {e}", self.layout.name()))?;
        log::debug!(
            "loaded {} matrix {} x {} with {} entries",
            loaded.layout.name(),
            loaded.rows,
            loaded.columns,
            loaded.nonzero_elements_count()
        );
        *self = loaded;
        Ok(())
    }

    fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        wire::read_header::<_, V>(r, L::KIND)?;
        let layout = L::read_params(r)?;
        let tag = wire::read_u64(r)?;
        let state = MatrixState::from_tag(tag)
            .ok_or_else(|| ContainerError::Format(format!("unknown matrix state {tag}")))?;
        let rows = wire::read_count(r)?;
        let columns = wire::read_count(r)?;
        let mut m = Self::with_layout(layout);
        if state == MatrixState::Uninitialized {
            if rows != 0 || columns != 0 {
                return Err(ContainerError::Format(
                    "uninitialized matrix with non-zero dimensions".into(),
                ));
            }
            return Ok(m);
        }
        m.set_dimensions(rows, columns);
        if state == MatrixState::Dimensioned {
            return Ok(m);
        }
        let capacities = wire::read_indices(r, rows)?;
        if let Some(row) = (0..rows).find(|&i| capacities[i] > columns) {
            return Err(ContainerError::Format(format!(
                "row {row} has capacity {} beyond {columns} columns",
                capacities[row]
            )));
        }
        checked_total(&capacities)
            .ok_or_else(|| ContainerError::Format("row capacities overflow".into()))?;
        let lengths = wire::read_indices(r, rows)?;
        if let Some(row) = (0..rows).find(|&i| lengths[i] > capacities[i]) {
            return Err(ContainerError::Format(format!(
                "row {row} stores {} entries but has capacity {}",
                lengths[row], capacities[row]
            )));
        }
        let nnz = checked_total(&lengths)
            .ok_or_else(|| ContainerError::Format("row lengths overflow".into()))?;
        let cols = wire::read_indices(r, nnz)?;
        let vals: Vec<V> = wire::read_elements(r, nnz)?;
        m.plan(capacities)
            .map_err(|e| ContainerError::Format(format!("unusable row capacities: {e}")))?;
        let mut k = 0;
        for (row, &len) in lengths.iter().enumerate() {
            let entries = &cols[k..k + len];
            if entries.iter().any(|&c| c >= columns) || entries.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ContainerError::Format(format!(
                    "row {row} holds unsorted or out-of-range columns"
                )));
            }
            let start = m.segments.range(row).start;
            m.column_indexes[start..start + len].copy_from_slice(entries);
            m.values[start..start + len].copy_from_slice(&vals[k..k + len]);
            m.lengths[row] = len;
            k += len;
        }
        m.state = state;
        m.debug_assert_invariants();
        Ok(m)
    }
}

/// `n` copies of `value`, failing instead of aborting when memory is short.
fn filled<T: Clone>(n: usize, value: T) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(n)
        .map_err(|e| ContainerError::SlotOverflow(format!("{n} slots: {e}")))?;
    out.resize(n, value);
    Ok(out)
}

fn checked_total(counts: &[usize]) -> Option<usize> {
    counts.iter().try_fold(0usize, |acc, &n| acc.checked_add(n))
}

/// Raw CSR arrays.
impl<V: Scalar> SparseMatrix<V, Csr> {
    /// `rows + 1` offsets of each row's slots.
    pub fn row_pointers(&self) -> &[usize] {
        self.segments.offsets()
    }

    /// Column index of every slot; unused slots hold [`PADDING_INDEX`].
    pub fn column_indexes(&self) -> &[usize] {
        &self.column_indexes
    }

    /// Value of every slot; unused slots hold zero.
    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<V: Scalar, L: SegmentLayout> DebugInvariants for SparseMatrix<V, L> {
    const CONTEXT: &'static str = "SparseMatrix";

    fn validate_invariants(&self) -> Result<()> {
        if !self.has_capacities() {
            return Ok(());
        }
        let bad = |msg: String| Err(ContainerError::Invariant(msg));
        if self.capacities.len() != self.rows
            || self.lengths.len() != self.rows
            || self.segments.rows() != self.rows
        {
            return bad(format!("row metadata does not match {} rows", self.rows));
        }
        if self.column_indexes.len() != self.segments.allocated()
            || self.values.len() != self.segments.allocated()
        {
            return bad("slot buffers do not match the layout".into());
        }
        for r in 0..self.rows {
            let seg = self.segments.range(r);
            if self.capacities[r] > seg.len() || self.lengths[r] > self.capacities[r] {
                return bad(format!("row {r} exceeds its segment"));
            }
            let used = self.used(r);
            let cols = &self.column_indexes[used.clone()];
            if cols.iter().any(|&c| c >= self.columns) || cols.windows(2).any(|w| w[0] >= w[1]) {
                return bad(format!("row {r} columns are unsorted or out of range"));
            }
            if self.column_indexes[used.end..seg.end]
                .iter()
                .any(|&c| c != PADDING_INDEX)
            {
                return bad(format!("row {r} has entries after padding"));
            }
        }
        Ok(())
    }
}

impl<V, L1, L2> PartialEq<SparseMatrix<V, L2>> for SparseMatrix<V, L1>
where
    V: Scalar,
    L1: SegmentLayout,
    L2: SegmentLayout,
{
    fn eq(&self, other: &SparseMatrix<V, L2>) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .row_iter()
                .zip(other.row_iter())
                .all(|(a, b)| a.nonzeros().eq(b.nonzeros()))
    }
}

impl<V: Scalar, L: SegmentLayout> fmt::Display for SparseMatrix<V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_iter() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container_error::ErrorKind;

    fn planned<L: SegmentLayout>(caps: &[usize]) -> SparseMatrix<f64, L> {
        let mut m = SparseMatrix::<f64, L>::with_dimensions(caps.len(), 6);
        m.set_row_capacities(caps).unwrap();
        m
    }

    #[test]
    fn state_machine() {
        let mut m = CsrMatrix::<f64>::new();
        assert_eq!(m.state(), MatrixState::Uninitialized);
        m.set_dimensions(3, 3);
        assert_eq!(m.state(), MatrixState::Dimensioned);
        assert_eq!(m.get_element(1, 1).unwrap(), 0.0);
        assert_eq!(
            m.set_element(1, 1, 1.0).unwrap_err(),
            ContainerError::CapacitiesNotSet
        );
        m.set_row_capacities(&[1, 1, 1]).unwrap();
        assert_eq!(m.state(), MatrixState::CapacityPlanned);
        m.set_element(1, 1, 1.0).unwrap();
        assert_eq!(m.state(), MatrixState::Populated);
        m.set_dimensions(2, 2);
        assert_eq!(m.state(), MatrixState::Dimensioned);
        assert_eq!(m.nonzero_elements_count(), 0);
        m.reset();
        assert_eq!(m.state(), MatrixState::Uninitialized);
    }

    #[test]
    fn wrong_capacity_count_keeps_plan() {
        let mut m = planned::<Ellpack>(&[2, 2]);
        m.set_element(0, 1, 3.0).unwrap();
        let e = m.set_row_capacities(&[1]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Shape);
        assert_eq!(m.get_element(0, 1).unwrap(), 3.0);
    }

    #[test]
    fn rows_stay_sorted_with_padding_last() {
        let mut m = planned::<Csr>(&[4]);
        for c in [5, 1, 3] {
            m.set_element(0, c, c as f64).unwrap();
        }
        assert_eq!(m.column_indexes(), &[1, 3, 5, PADDING_INDEX]);
        assert_eq!(m.values(), &[1.0, 3.0, 5.0, 0.0]);
        assert_eq!(m.row_pointers(), &[0, 4]);
        assert!(m.validate_invariants().is_ok());
    }

    #[test]
    fn planned_capacity_is_enforced_in_every_format() {
        fn check<L: SegmentLayout>() {
            let mut m = planned::<L>(&[1, 3]);
            m.set_element(0, 0, 1.0).unwrap();
            m.set_element(0, 0, 2.0).unwrap();
            let e = m.set_element(0, 1, 1.0).unwrap_err();
            assert_eq!(e, ContainerError::CapacityExceeded { row: 0, capacity: 1 });
            assert_eq!(e.kind(), ErrorKind::Capacity);
            assert_eq!(m.get_element(0, 0).unwrap(), 2.0);
            assert_eq!(m.row_length(0).unwrap(), 1);
        }
        check::<Csr>();
        check::<Ellpack>();
        check::<SlicedEllpack>();
    }

    #[test]
    fn out_of_range_positions() {
        let mut m = planned::<SlicedEllpack>(&[1, 1]);
        assert_eq!(m.get_element(2, 0).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(m.set_element(0, 6, 1.0).unwrap_err().kind(), ErrorKind::Index);
        assert!(m.row(2).is_err());
        assert!(m.row_capacity(5).is_err());
    }

    #[test]
    fn add_element_accumulates() {
        let mut m = planned::<Ellpack>(&[2, 0]);
        m.add_element(0, 2, 1.5, 2.0).unwrap();
        m.add_element(0, 2, 1.0, -0.5).unwrap();
        m.add_element(0, 4, 4.0, 1.0).unwrap();
        assert_eq!(m.get_element(0, 2).unwrap(), 2.5);
        assert_eq!(m.get_element(0, 4).unwrap(), 4.0);
        assert_eq!(m.nonzero_elements_count(), 2);
        assert_eq!(m.max_row_length(), 2);
        assert_eq!(m.compressed_row_lengths(), vec![2, 0]);
    }

    #[test]
    fn allocation_counts_differ_by_format() {
        let caps = [1, 3, 2, 0];
        assert_eq!(planned::<Csr>(&caps).allocated_elements_count(), 6);
        assert_eq!(planned::<Ellpack>(&caps).allocated_elements_count(), 12);
        let mut s = SlicedEllpackMatrix::<f64>::with_layout(SlicedEllpack::new(2));
        s.set_dimensions(4, 6);
        s.set_row_capacities(&caps).unwrap();
        assert_eq!(s.allocated_elements_count(), 10);
    }

    #[test]
    fn compress_shrinks_to_lengths() {
        let mut m = planned::<Csr>(&[3, 3, 3]);
        m.set_element(0, 1, 1.0).unwrap();
        m.set_element(2, 0, 2.0).unwrap();
        m.set_element(2, 5, 3.0).unwrap();
        let before = m.clone();
        m.compress().unwrap();
        assert_eq!(m.allocated_elements_count(), 3);
        assert_eq!(m.row_capacities(), &[1, 0, 2]);
        assert_eq!(m, before);
        assert_eq!(m.state(), MatrixState::Populated);
    }

    #[test]
    fn set_like_copies_plan_not_data() {
        let mut a = planned::<SlicedEllpack>(&[2, 1, 0]);
        a.set_element(1, 1, 9.0).unwrap();
        let mut b = SlicedEllpackMatrix::<f32>::new();
        b.set_like(&a).unwrap();
        assert_eq!(b.rows(), 3);
        assert_eq!(b.row_capacities(), &[2, 1, 0]);
        assert_eq!(b.nonzero_elements_count(), 0);
        assert_eq!(b.state(), MatrixState::CapacityPlanned);
    }

    #[test]
    fn equality_across_formats() {
        let mut a = planned::<Csr>(&[2, 1]);
        let mut b = planned::<Ellpack>(&[3, 3]);
        a.set_element(0, 3, 1.0).unwrap();
        b.set_element(0, 3, 1.0).unwrap();
        b.set_element(1, 2, 0.0).unwrap();
        assert!(a == b);
        a.set_element(1, 1, 2.0).unwrap();
        assert!(a != b);
    }

    #[test]
    fn display_lists_rows() {
        let mut m = planned::<Csr>(&[1, 1]);
        m.set_element(1, 5, 5.5).unwrap();
        assert_eq!(m.to_string(), "Row: 0 -> \nRow: 1 -> Col:5->5.5\n");
    }

    #[test]
    fn save_load_keeps_state_and_layout() {
        let mut m = SlicedEllpackMatrix::<f64>::with_layout(SlicedEllpack::new(3));
        m.set_dimensions(5, 5);
        m.set_row_capacities(&[1, 2, 0, 1, 1]).unwrap();
        m.set_element(1, 4, 1.0).unwrap();
        m.set_element(1, 0, 2.0).unwrap();
        let mut buf = Vec::new();
        m.save(&mut buf).unwrap();
        let mut back = SlicedEllpackMatrix::<f64>::new();
        back.load(&mut &buf[..]).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.layout().slice_size(), 3);
        assert_eq!(back.row_capacities(), m.row_capacities());
        assert_eq!(back.state(), MatrixState::Populated);
    }

    #[test]
    fn unaddressable_capacities_keep_previous_plan() {
        let mut m = planned::<Ellpack>(&[1, 1]);
        m.set_element(1, 0, 4.0).unwrap();
        let e = m.set_row_capacities(&[usize::MAX / 2, 1]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Capacity);
        assert_eq!(m.row_capacities(), &[1, 1]);
        assert_eq!(m.get_element(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn load_rejects_other_format() {
        let m = planned::<Csr>(&[1]);
        let mut buf = Vec::new();
        m.save(&mut buf).unwrap();
        let mut e = EllpackMatrix::<f64>::new();
        assert_eq!(e.load(&mut &buf[..]).unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(e.state(), MatrixState::Uninitialized);
    }
}
