//! Sparse matrices in CSR, Ellpack and Sliced-Ellpack layouts.
//!
//! All formats share one generic [`SparseMatrix`]; the [`SegmentLayout`]
//! parameter decides only how many slots each row reserves.

pub mod kernels;
pub mod row;
pub mod segments;
pub mod sparse;

pub use row::SparseRow;
pub use segments::{Csr, Ellpack, SegmentLayout, Segments, SlicedEllpack};
pub use sparse::{
    CsrMatrix, EllpackMatrix, MatrixState, PADDING_INDEX, SlicedEllpackMatrix, SparseMatrix,
};
