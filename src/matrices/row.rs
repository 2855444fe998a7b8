//! Read-only view of one sparse-matrix row.

use std::fmt;

use itertools::Itertools;
use num_traits::Zero;

use crate::containers::element::Scalar;

/// Stored entries of a row, sorted by column.
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a, V> {
    row: usize,
    capacity: usize,
    columns: &'a [usize],
    values: &'a [V],
}

impl<'a, V: Scalar> SparseRow<'a, V> {
    pub(crate) fn new(row: usize, capacity: usize, columns: &'a [usize], values: &'a [V]) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self {
            row,
            capacity,
            columns,
            values,
        }
    }

    /// Index of this row in its matrix.
    pub fn row_index(&self) -> usize {
        self.row
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Planned capacity of the row.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Column of the `i`-th stored entry.
    pub fn column(&self, i: usize) -> Option<usize> {
        self.columns.get(i).copied()
    }

    /// Value of the `i`-th stored entry.
    pub fn value(&self, i: usize) -> Option<V> {
        self.values.get(i).copied()
    }

    /// Value at `column`, zero if not stored.
    pub fn get(&self, column: usize) -> V {
        self.columns
            .binary_search(&column)
            .map_or(V::zero(), |k| self.values[k])
    }

    pub fn columns(&self) -> &'a [usize] {
        self.columns
    }

    pub fn values(&self) -> &'a [V] {
        self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, V)> + 'a {
        self.columns.iter().copied().zip(self.values.iter().copied())
    }

    /// Entries with a non-zero value.
    pub(crate) fn nonzeros(&self) -> impl Iterator<Item = (usize, V)> + 'a {
        self.iter().filter(|(_, v)| !v.is_zero())
    }
}

impl<V: Scalar> fmt::Display for SparseRow<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row: {} -> {}",
            self.row,
            self.iter().map(|(c, v)| format!("Col:{c}->{v}")).join("\t")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_iteration() {
        let cols = [1usize, 4, 7];
        let vals = [0.5f64, 0.0, 2.0];
        let row = SparseRow::new(3, 5, &cols, &vals);
        assert_eq!(row.len(), 3);
        assert_eq!(row.capacity(), 5);
        assert_eq!(row.get(4), 0.0);
        assert_eq!(row.get(7), 2.0);
        assert_eq!(row.get(2), 0.0);
        assert_eq!(row.column(1), Some(4));
        assert_eq!(row.value(3), None);
        assert_eq!(row.nonzeros().count(), 2);
        assert_eq!(row.to_string(), "Row: 3 -> Col:1->0.5\tCol:4->0\tCol:7->2");
    }
}
