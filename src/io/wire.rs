//! Fixed, versioned, little-endian wire types for `save`/`load`.
//!
//! Every stream starts with a [`WireHdr`] naming the container kind and the
//! element type, followed by kind-specific `u64` metadata and a raw
//! little-endian element payload.

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut};
use static_assertions::const_assert_eq;
use std::io::{Read, Write};
use std::mem::{align_of, size_of};

use crate::container_error::ContainerError;
use crate::containers::element::{Element, ElementType};

/// Leading bytes of every stream.
pub const WIRE_MAGIC: [u8; 4] = *b"NDCW";

/// Bump when the layout or semantics change in incompatible ways.
pub const WIRE_VERSION: u16 = 1;

/// Container kind carried in [`WireHdr::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum WireKind {
    Array = 1,
    Csr = 2,
    Ellpack = 3,
    SlicedEllpack = 4,
}

impl WireKind {
    pub fn from_u16(v: u16) -> Option<Self> {
        Some(match v {
            1 => WireKind::Array,
            2 => WireKind::Csr,
            3 => WireKind::Ellpack,
            4 => WireKind::SlicedEllpack,
            _ => return None,
        })
    }
}

/// All multi-byte integers in these structs are **little-endian** on the wire.
/// We store them pre-LE with `.to_le()` and decode with `.from_le()`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WireHdr {
    pub magic: [u8; 4],
    pub version_le: u16,
    pub kind_le: u16,
    pub value_le: u16,
    pub reserved_le: u16, // future use; keep zero
}

impl WireHdr {
    pub fn new(kind: WireKind, value: ElementType) -> Self {
        Self {
            magic: WIRE_MAGIC,
            version_le: WIRE_VERSION.to_le(),
            kind_le: (kind as u16).to_le(),
            value_le: value.tag().to_le(),
            reserved_le: 0,
        }
    }
    pub fn version(&self) -> u16 {
        u16::from_le(self.version_le)
    }
    pub fn kind(&self) -> u16 {
        u16::from_le(self.kind_le)
    }
    pub fn value(&self) -> u16 {
        u16::from_le(self.value_le)
    }

    /// Check the header against what the reader expects.
    pub fn validate(&self, kind: WireKind, value: ElementType) -> Result<(), ContainerError> {
        if self.magic != WIRE_MAGIC {
            return Err(ContainerError::Format(format!(
                "bad magic {:?}",
                self.magic
            )));
        }
        if self.version() != WIRE_VERSION {
            return Err(ContainerError::Format(format!(
                "unsupported wire version {} (expected {WIRE_VERSION})",
                self.version()
            )));
        }
        if WireKind::from_u16(self.kind()) != Some(kind) {
            return Err(ContainerError::Format(format!(
                "stream holds container kind {} but {:?} was expected",
                self.kind(),
                kind
            )));
        }
        match ElementType::from_tag(self.value()) {
            Some(t) if t == value => Ok(()),
            Some(t) => Err(ContainerError::Format(format!(
                "stream holds {} elements but {} was expected",
                t.rust_name(),
                value.rust_name()
            ))),
            None => Err(ContainerError::Format(format!(
                "unknown element tag {}",
                self.value()
            ))),
        }
    }
}

const_assert_eq!(size_of::<WireHdr>(), 12);
const_assert_eq!(align_of::<WireHdr>(), 2);

/// Write the header for `kind` holding `V` elements.
pub fn write_header<W: Write, V: Element>(w: &mut W, kind: WireKind) -> Result<(), ContainerError> {
    let hdr = WireHdr::new(kind, V::TYPE);
    w.write_all(bytemuck::bytes_of(&hdr))?;
    Ok(())
}

/// Read and validate a header.
pub fn read_header<R: Read, V: Element>(r: &mut R, kind: WireKind) -> Result<WireHdr, ContainerError> {
    let mut raw = [0u8; size_of::<WireHdr>()];
    r.read_exact(&mut raw)?;
    let hdr: WireHdr = bytemuck::pod_read_unaligned(&raw);
    hdr.validate(kind, V::TYPE)?;
    Ok(hdr)
}

pub fn write_u64<W: Write>(w: &mut W, v: u64) -> Result<(), ContainerError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn read_u64<R: Read>(r: &mut R) -> Result<u64, ContainerError> {
    let mut raw = [0u8; 8];
    r.read_exact(&mut raw)?;
    Ok(u64::from_le_bytes(raw))
}

/// Read a `u64` count and check that it is addressable on this host.
pub fn read_count<R: Read>(r: &mut R) -> Result<usize, ContainerError> {
    let n = read_u64(r)?;
    usize::try_from(n).map_err(|_| ContainerError::Format(format!("count {n} does not fit in usize")))
}

/// Read exactly `len` bytes without trusting `len` for preallocation.
pub fn read_bytes<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>, ContainerError> {
    let mut buf = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(ContainerError::Io(format!(
            "truncated payload: expected {len} bytes, got {}",
            buf.len()
        )));
    }
    Ok(buf)
}

/// Encode `values` little-endian.
pub fn write_elements<W: Write, V: Element>(w: &mut W, values: &[V]) -> Result<(), ContainerError> {
    let mut buf = Vec::with_capacity(values.len() * V::TYPE.size());
    for &v in values {
        v.put_le(&mut buf);
    }
    w.write_all(&buf)?;
    Ok(())
}

/// Decode `n` little-endian values.
pub fn read_elements<R: Read, V: Element>(r: &mut R, n: usize) -> Result<Vec<V>, ContainerError> {
    let len = n
        .checked_mul(V::TYPE.size())
        .ok_or_else(|| ContainerError::Format(format!("element count {n} overflows")))?;
    let raw = read_bytes(r, len)?;
    let mut rd = &raw[..];
    let mut out = Vec::with_capacity(n);
    while rd.has_remaining() {
        out.push(V::get_le(&mut rd));
    }
    Ok(out)
}

/// Encode a run of `usize` values as `u64`.
pub fn write_indices<W: Write>(w: &mut W, values: &[usize]) -> Result<(), ContainerError> {
    let mut buf = Vec::with_capacity(values.len() * 8);
    for &v in values {
        buf.put_u64_le(v as u64);
    }
    w.write_all(&buf)?;
    Ok(())
}

/// Decode `n` `u64` values into `usize`.
pub fn read_indices<R: Read>(r: &mut R, n: usize) -> Result<Vec<usize>, ContainerError> {
    let len = n
        .checked_mul(8)
        .ok_or_else(|| ContainerError::Format(format!("index count {n} overflows")))?;
    let raw = read_bytes(r, len)?;
    let mut rd = &raw[..];
    let mut out = Vec::with_capacity(n);
    while rd.has_remaining() {
        let v = rd.get_u64_le();
        out.push(
            usize::try_from(v)
                .map_err(|_| ContainerError::Format(format!("index {v} does not fit in usize")))?,
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container_error::ErrorKind;

    #[test]
    fn header_roundtrip() {
        let mut buf = Vec::new();
        write_header::<_, f64>(&mut buf, WireKind::Csr).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(&buf[..4], b"NDCW");
        let hdr = read_header::<_, f64>(&mut &buf[..], WireKind::Csr).unwrap();
        assert_eq!(hdr.version(), WIRE_VERSION);
        assert_eq!(hdr.kind(), WireKind::Csr as u16);
    }

    #[test]
    fn header_kind_and_type_mismatch() {
        let mut buf = Vec::new();
        write_header::<_, f64>(&mut buf, WireKind::Csr).unwrap();
        let e = read_header::<_, f64>(&mut &buf[..], WireKind::Ellpack).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Format);
        let e = read_header::<_, i32>(&mut &buf[..], WireKind::Csr).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Format);
    }

    #[test]
    fn bad_magic_is_format_error() {
        let mut buf = Vec::new();
        write_header::<_, i64>(&mut buf, WireKind::Array).unwrap();
        buf[0] = b'X';
        let e = read_header::<_, i64>(&mut &buf[..], WireKind::Array).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Format);
    }

    #[test]
    fn short_header_is_io_error() {
        let buf = [b'N', b'D'];
        let e = read_header::<_, i64>(&mut &buf[..], WireKind::Array).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Io);
    }

    #[test]
    fn truncated_elements_are_io_error() {
        let mut buf = Vec::new();
        write_elements(&mut buf, &[1.0f64, 2.0]).unwrap();
        buf.pop();
        let e = read_elements::<_, f64>(&mut &buf[..], 2).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Io);
    }

    #[test]
    fn indices_roundtrip() {
        let mut buf = Vec::new();
        write_indices(&mut buf, &[0, 7, usize::MAX]).unwrap();
        let back = read_indices(&mut &buf[..], 3).unwrap();
        assert_eq!(back, vec![0, 7, usize::MAX]);
    }
}
