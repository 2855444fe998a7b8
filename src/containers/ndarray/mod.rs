//! N-dimensional arrays: addressing, owned arrays, views and traversal.

use std::fmt;

use itertools::Itertools;

use crate::containers::buffer::BufferInfo;
use crate::containers::element::Element;

pub mod access;
pub mod array;
pub mod indexer;
pub mod traversal;
pub mod view;

pub use access::NDArrayAccess;
pub use array::NDArray;
pub use indexer::Indexer;
pub use traversal::Region;
pub use view::NDArrayView;

/// Buffer descriptor for row-major storage starting at `base`; the pointer
/// addresses logical index zero.
pub(crate) fn describe<'a, V: Element, const D: usize>(
    indexer: &Indexer<D>,
    base: *const V,
) -> BufferInfo<'a> {
    let first = if indexer.storage_size() == 0 {
        base
    } else {
        base.wrapping_add(indexer.offset_unchecked(&[0; D]))
    };
    BufferInfo::from_const(
        first,
        indexer.sizes().to_vec(),
        indexer.strides().iter().map(|&s| s as isize).collect(),
    )
}

/// `Name[D, type](s0, s1, ...)`.
pub(crate) fn write_header(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    type_name: &str,
    sizes: &[usize],
) -> fmt::Result {
    write!(
        f,
        "{name}[{}, {type_name}]({})",
        sizes.len(),
        sizes.iter().join(", ")
    )
}
