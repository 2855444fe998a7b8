//! Dense containers: flat arrays, vectors, N-dimensional and distributed arrays.

pub mod array;
pub mod array_view;
pub mod buffer;
pub mod distributed;
pub mod element;
pub mod ndarray;
pub(crate) mod serde_array;
pub mod storage;
pub mod vector;

pub use array::Array;
pub use array_view::ArrayView;
pub use buffer::BufferInfo;
pub use distributed::{DistributedNDArray, DistributedNDArrayView, LocalRange};
pub use element::{Element, ElementType, Scalar};
pub use ndarray::{Indexer, NDArray, NDArrayAccess, NDArrayView};
pub use storage::{Storage, VecStorage};
pub use vector::Vector;
