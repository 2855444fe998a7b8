//! ContainerError: Unified error type for nd-containers public APIs
//!
//! Every fallible operation in the crate returns this error. Variants are
//! grouped into coarse [`ErrorKind`]s so callers (and bindings that need to
//! map onto `ValueError`/`IndexError`/`TypeError`-style exceptions) can branch
//! on the category without matching every variant.

use thiserror::Error;

/// Coarse classification of a [`ContainerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid argument value (negative size, inconsistent range).
    Value,
    /// Out-of-range element, row, column, or non-owned index.
    Index,
    /// Wrong number of indices or mismatched tuple/vector lengths.
    Shape,
    /// Sparse-matrix write that does not fit the planned row capacity.
    Capacity,
    /// Corrupt or incompatible serialized stream.
    Format,
    /// Underlying stream failure (including truncation).
    Io,
    /// Mutation attempted through a read-only view.
    ReadOnly,
}

/// Unified error type for nd-containers operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// A size argument was negative.
    #[error("size must be non-negative, got {0}")]
    NegativeSize(isize),
    /// A flat element index fell outside `[0, size)`.
    #[error("index {index} is out-of-bounds for given array with size {size}")]
    IndexOutOfBounds { index: isize, size: usize },
    /// A fill range was not a sub-range of `[0, size]`.
    #[error("range [{begin}, {end}) is invalid for given array with size {size}")]
    InvalidRange { begin: isize, end: isize, size: usize },
    /// A component of a multi-index fell outside its admissible interval.
    #[error("{axis}-th index is out-of-bounds: {index} not in [{lower}, {upper})")]
    AxisOutOfBounds {
        axis: usize,
        index: isize,
        lower: isize,
        upper: isize,
    },
    /// Element access on an N-dimensional array whose storage is not allocated.
    #[error("storage of the array is not allocated")]
    NotAllocated,
    /// Wrong number of indices.
    #[error("expected {expected} indices, got {found}")]
    ArgumentCount { expected: usize, found: usize },
    /// Two lengths that must agree do not.
    #[error("shape mismatch: expected length {expected}, got {found}")]
    ShapeMismatch { expected: usize, found: usize },
    /// A local range is not contained in the global shape.
    #[error("invalid distribution on axis {axis}: [{begin}, {end}) is not within [0, {size})")]
    InvalidDistribution {
        axis: usize,
        begin: usize,
        end: usize,
        size: usize,
    },
    /// A striping request named an axis or rank that does not exist.
    #[error("cannot stripe axis {axis} for rank {rank} of {nranks}")]
    InvalidPartition {
        axis: usize,
        rank: usize,
        nranks: usize,
    },
    /// Sparse-matrix row index out of range.
    #[error("row index {row} is out-of-bounds for matrix with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },
    /// Sparse-matrix column index out of range.
    #[error("column index {column} is out-of-bounds for matrix with {columns} columns")]
    ColumnOutOfBounds { column: usize, columns: usize },
    /// Element write before `set_row_capacities`.
    #[error("row capacities must be set before elements are written")]
    CapacitiesNotSet,
    /// A row has no free slot for a new column.
    #[error("row {row} has no free slot left (capacity {capacity})")]
    CapacityExceeded { row: usize, capacity: usize },
    /// Row capacities reserve more slots than can be addressed or allocated.
    #[error("row capacities do not fit in memory ({0})")]
    SlotOverflow(String),
    /// The diagonal entry needed by an SOR sweep is absent or zero.
    #[error("diagonal element of row {row} is zero or not stored")]
    ZeroDiagonal { row: usize },
    /// Write attempted through a const view.
    #[error("cannot modify elements through a read-only view")]
    ReadOnlyView,
    /// A structural invariant check failed.
    #[error("invariant violated: {0}")]
    Invariant(String),
    /// Malformed serialized stream.
    #[error("format error: {0}")]
    Format(String),
    /// I/O failure while reading or writing a stream.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ContainerError {
    /// Coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        use ContainerError::*;
        match self {
            NegativeSize(_)
            | InvalidDistribution { .. }
            | InvalidPartition { .. }
            | Invariant(_) => ErrorKind::Value,
            IndexOutOfBounds { .. }
            | InvalidRange { .. }
            | AxisOutOfBounds { .. }
            | NotAllocated
            | RowOutOfBounds { .. }
            | ColumnOutOfBounds { .. } => ErrorKind::Index,
            ArgumentCount { .. } | ShapeMismatch { .. } => ErrorKind::Shape,
            CapacitiesNotSet
            | CapacityExceeded { .. }
            | SlotOverflow(_)
            | ZeroDiagonal { .. } => ErrorKind::Capacity,
            Format(_) => ErrorKind::Format,
            Io(_) => ErrorKind::Io,
            ReadOnlyView => ErrorKind::ReadOnly,
        }
    }
}

impl From<std::io::Error> for ContainerError {
    fn from(e: std::io::Error) -> Self {
        ContainerError::Io(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ContainerError>;
