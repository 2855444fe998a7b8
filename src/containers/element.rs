//! Element types storable in containers.
//!
//! The set of element types is closed: plain-old-data integers and floats.
//! Each carries a stable wire tag (used by `save`/`load`), a buffer-protocol
//! format character (used by [`BufferInfo`](crate::containers::buffer::BufferInfo))
//! and little-endian encode/decode routines.

use bytes::{Buf, BufMut};
use std::fmt::{Debug, Display};

/// Runtime descriptor of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum ElementType {
    I8 = 1,
    I16 = 2,
    I32 = 3,
    I64 = 4,
    U8 = 5,
    U16 = 6,
    U32 = 7,
    U64 = 8,
    F32 = 9,
    F64 = 10,
}

impl ElementType {
    /// Wire tag of this type.
    #[inline]
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u16) -> Option<Self> {
        use ElementType::*;
        Some(match tag {
            1 => I8,
            2 => I16,
            3 => I32,
            4 => I64,
            5 => U8,
            6 => U16,
            7 => U32,
            8 => U64,
            9 => F32,
            10 => F64,
            _ => return None,
        })
    }

    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        use ElementType::*;
        match self {
            I8 | U8 => 1,
            I16 | U16 => 2,
            I32 | U32 | F32 => 4,
            I64 | U64 | F64 => 8,
        }
    }

    /// Struct-module style format character (`'d'` for `f64`, `'q'` for `i64`, ...).
    pub fn format_char(self) -> char {
        use ElementType::*;
        match self {
            I8 => 'b',
            I16 => 'h',
            I32 => 'i',
            I64 => 'q',
            U8 => 'B',
            U16 => 'H',
            U32 => 'I',
            U64 => 'Q',
            F32 => 'f',
            F64 => 'd',
        }
    }

    /// Short name used in string representations (`"int"`, `"float"`, ...).
    pub fn name(self) -> &'static str {
        use ElementType::*;
        match self {
            I8 | I16 | I32 | I64 => "int",
            U8 | U16 | U32 | U64 => "uint",
            F32 | F64 => "float",
        }
    }

    /// Rust spelling of the type, used in serialization type strings.
    pub fn rust_name(self) -> &'static str {
        use ElementType::*;
        match self {
            I8 => "i8",
            I16 => "i16",
            I32 => "i32",
            I64 => "i64",
            U8 => "u8",
            U16 => "u16",
            U32 => "u32",
            U64 => "u64",
            F32 => "f32",
            F64 => "f64",
        }
    }
}

/// A value that can live in an [`Array`](crate::containers::array::Array).
pub trait Element:
    bytemuck::Pod + Default + PartialEq + Debug + Display + Send + Sync + 'static
{
    /// Runtime descriptor of `Self`.
    const TYPE: ElementType;

    /// Append `self` in little-endian byte order.
    fn put_le<B: BufMut>(self, buf: &mut B);

    /// Read one little-endian value. The caller guarantees `buf.remaining()`
    /// is at least `Self::TYPE.size()`.
    fn get_le<B: Buf>(buf: &mut B) -> Self;
}

/// Element types supporting ring arithmetic and ordering; the value type of
/// [`Vector`](crate::containers::vector::Vector) and the sparse matrices.
pub trait Scalar: Element + num_traits::Num + PartialOrd {}

impl<T: Element + num_traits::Num + PartialOrd> Scalar for T {}

macro_rules! impl_element {
    ($t:ty, $variant:ident, $put:ident, $get:ident) => {
        impl Element for $t {
            const TYPE: ElementType = ElementType::$variant;

            #[inline]
            fn put_le<B: BufMut>(self, buf: &mut B) {
                buf.$put(self);
            }

            #[inline]
            fn get_le<B: Buf>(buf: &mut B) -> Self {
                buf.$get()
            }
        }
    };
}

impl_element!(i8, I8, put_i8, get_i8);
impl_element!(i16, I16, put_i16_le, get_i16_le);
impl_element!(i32, I32, put_i32_le, get_i32_le);
impl_element!(i64, I64, put_i64_le, get_i64_le);
impl_element!(u8, U8, put_u8, get_u8);
impl_element!(u16, U16, put_u16_le, get_u16_le);
impl_element!(u32, U32, put_u32_le, get_u32_le);
impl_element!(u64, U64, put_u64_le, get_u64_le);
impl_element!(f32, F32, put_f32_le, get_f32_le);
impl_element!(f64, F64, put_f64_le, get_f64_le);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for t in [
            ElementType::I8,
            ElementType::I16,
            ElementType::I32,
            ElementType::I64,
            ElementType::U8,
            ElementType::U16,
            ElementType::U32,
            ElementType::U64,
            ElementType::F32,
            ElementType::F64,
        ] {
            assert_eq!(ElementType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(ElementType::from_tag(0), None);
        assert_eq!(ElementType::from_tag(99), None);
    }

    #[test]
    fn sizes_match_rust_types() {
        assert_eq!(<f64 as Element>::TYPE.size(), std::mem::size_of::<f64>());
        assert_eq!(<i16 as Element>::TYPE.size(), std::mem::size_of::<i16>());
        assert_eq!(<u8 as Element>::TYPE.size(), 1);
    }

    #[test]
    fn little_endian_encoding() {
        let mut buf = Vec::new();
        0x0102_0304i32.put_le(&mut buf);
        assert_eq!(buf, vec![4, 3, 2, 1]);
        let mut rd = &buf[..];
        assert_eq!(i32::get_le(&mut rd), 0x0102_0304);
    }
}
