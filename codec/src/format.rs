//! Format-string front end over the record layer.
//!
//! A format string is a concatenation of tokens, one per field, with no
//! separators: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `d`
//! (double), `s` (string), `b` (boolean). `"u8db"` names a three-field
//! message: an unsigned 8-bit integer, a double, and a boolean.

use crate::{
    record::{deserialize, serialize, Kind, Records, Value},
    Error,
};
use bytes::Bytes;

/// Recognized tokens, longest-first within each prefix so `u16` is not read
/// as `u1` + garbage.
const TOKENS: [(&str, Kind); 11] = [
    ("u16", Kind::U16),
    ("u32", Kind::U32),
    ("u64", Kind::U64),
    ("u8", Kind::U8),
    ("i16", Kind::I16),
    ("i32", Kind::I32),
    ("i64", Kind::I64),
    ("i8", Kind::I8),
    ("d", Kind::Double),
    ("s", Kind::Str),
    ("b", Kind::Bool),
];

/// Parses a format string into its kind sequence.
///
/// Fails with [Error::InvalidFormat] at the byte offset of the first
/// unrecognized token.
pub fn parse_format(format: &str) -> Result<Vec<Kind>, Error> {
    let mut kinds = Vec::new();
    let mut rest = format;
    while !rest.is_empty() {
        let offset = format.len() - rest.len();
        let (token, kind) = TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
            .ok_or(Error::InvalidFormat(offset))?;
        kinds.push(*kind);
        rest = &rest[token.len()..];
    }
    Ok(kinds)
}

/// Serializes `values` after checking each against the format string.
///
/// The value list must match the format in both length and per-position
/// kind.
pub fn serialize_values(format: &str, values: &[Value]) -> Result<Bytes, Error> {
    let kinds = parse_format(format)?;
    if kinds.len() != values.len() {
        return Err(Error::ArityMismatch {
            expected: kinds.len(),
            found: values.len(),
        });
    }
    let mut records = Records::new();
    for (kind, value) in kinds.into_iter().zip(values) {
        if value.kind() != kind {
            return Err(Error::KindMismatch {
                expected: kind,
                found: value.kind(),
            });
        }
        records.push(value.clone())?;
    }
    serialize(&records)
}

/// Deserializes packed bytes using a format string as the template.
pub fn deserialize_values(buf: &[u8], format: &str) -> Result<Vec<Value>, Error> {
    let kinds = parse_format(format)?;
    Ok(deserialize(buf, &kinds)?.into())
}
