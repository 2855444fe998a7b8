//! Distributed N-dimensional arrays and their partitioning helpers.

pub mod array;
pub mod distribution;
pub mod view;

pub use array::DistributedNDArray;
pub use distribution::{LocalRange, covers_exactly, stripe_along_axis};
pub use view::DistributedNDArrayView;
