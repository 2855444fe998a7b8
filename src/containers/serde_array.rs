//! `#[serde(with = ...)]` support for const-generic `[T; D]` fields.
//!
//! Arrays are written as plain sequences and must come back with exactly `D`
//! elements.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) fn serialize<S, T, const D: usize>(value: &[T; D], ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    value.as_slice().serialize(ser)
}

pub(crate) fn deserialize<'de, De, T, const D: usize>(de: De) -> Result<[T; D], De::Error>
where
    De: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Vec::<T>::deserialize(de)?;
    let len = items.len();
    items
        .try_into()
        .map_err(|_| De::Error::invalid_length(len, &format!("an array of length {D}").as_str()))
}
