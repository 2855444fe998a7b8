#![cfg_attr(docsrs, feature(doc_cfg))]
//! # nd-containers
//!
//! nd-containers provides the storage layer of a numerical library: flat
//! element buffers, strided N-dimensional arrays with ghost (overlap) regions,
//! distributed arrays that own a sub-box of a global index space, and sparse
//! matrices in CSR, Ellpack and Sliced-Ellpack layouts.
//!
//! ## Features
//! - [`Array`](containers::Array) and arithmetic [`Vector`](containers::Vector) buffers with
//!   bulk fill, views and binary `save`/`load`
//! - [`Indexer`](containers::Indexer): row-major strides with per-axis overlaps
//! - [`NDArray`](containers::NDArray) and borrowed [`NDArrayView`](containers::NDArrayView)s
//!   with all/interior/boundary traversal (parallel with the `rayon` feature)
//! - [`DistributedNDArray`](containers::DistributedNDArray): global indexing over a local block
//! - [`SparseMatrix`](matrices::SparseMatrix) generic over its [`SegmentLayout`](matrices::SegmentLayout)
//!
//! ## Cargo features
//! - `rayon`: run traversal callbacks on the rayon thread pool.
//! - `check-invariants`: validate structural invariants after mutations in
//!   release builds (always on with `debug_assertions`).
//!
//! ## Logging
//! The crate logs through the [`log`] facade and installs no logger.

pub mod container_error;
pub mod containers;
pub mod debug_invariants;
pub mod io;
pub mod matrices;

pub use container_error::{ContainerError, ErrorKind, Result};
pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::container_error::{ContainerError, ErrorKind};
    pub use crate::containers::ndarray::Region;
    pub use crate::containers::{
        Array, ArrayView, BufferInfo, DistributedNDArray, DistributedNDArrayView, Element,
        ElementType, Indexer, LocalRange, NDArray, NDArrayAccess, NDArrayView, Scalar, Vector,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::matrices::{
        Csr, CsrMatrix, Ellpack, EllpackMatrix, MatrixState, SegmentLayout, SlicedEllpack,
        SlicedEllpackMatrix, SparseMatrix, SparseRow,
    };
}
