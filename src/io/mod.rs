//! Binary stream support shared by every container's `save`/`load`.

pub mod wire;

pub use wire::{WIRE_MAGIC, WIRE_VERSION, WireHdr, WireKind};
