//! Tagged records: typed values, record lists, and whole-message
//! serialization.
//!
//! A [Value] pairs a scalar with its kind; a [Records] list is the unit of
//! serialization. Every field is encoded headered, so the byte stream is
//! self-describing up to the kind sequence: decoding requires the same
//! template of kinds the encoder used, but not any field's width.

use crate::{
    pack::{pack, unpack},
    scalar::{
        float::{read_double, write_double},
        int::{read_int, read_uint, write_int, write_uint},
        read_bool,
        text::{read_str, validate_str, write_str},
        write_bool,
    },
    BitQueue, BitReader, Error, Width,
};
use bytes::Bytes;
use paste::paste;

/// The kind of a [Value], without its payload.
///
/// A sequence of kinds is the decode template for a serialized record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Double,
    Str,
    Bool,
}

/// A single typed record.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    Str(String),
    Bool(bool),
}

macro_rules! impl_accessors {
    ($($variant:ident => $type:ty),+ $(,)?) => {
        paste! {
            $(
                #[doc = "Returns the payload if this is a [Value::" $variant "]."]
                pub fn [<as_ $variant:lower>](&self) -> Option<$type> {
                    match self {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            )+
        }
    };
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Double(_) => Kind::Double,
            Value::Str(_) => Kind::Str,
            Value::Bool(_) => Kind::Bool,
        }
    }

    /// Checks that this value is encodable without writing anything.
    ///
    /// Integer variants are bounded by their type; only doubles and strings
    /// carry payloads the type system cannot rule out.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Value::Double(v) if !v.is_finite() => Err(Error::NotFinite),
            Value::Str(v) => validate_str(v),
            Value::I8(v) if *v == i8::MIN => Err(Error::ValueOutOfRange { bits: 8 }),
            Value::I16(v) if *v == i16::MIN => Err(Error::ValueOutOfRange { bits: 16 }),
            Value::I32(v) if *v == i32::MIN => Err(Error::ValueOutOfRange { bits: 32 }),
            Value::I64(v) if *v == i64::MIN => Err(Error::ValueOutOfRange { bits: 64 }),
            _ => Ok(()),
        }
    }

    impl_accessors!(
        U8 => u8,
        U16 => u16,
        U32 => u32,
        U64 => u64,
        I8 => i8,
        I16 => i16,
        I32 => i32,
        I64 => i64,
        Double => f64,
        Bool => bool,
    );

    /// Returns the payload if this is a [Value::Str].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// An ordered list of records, validated on insertion.
///
/// Values that cannot be encoded (non-finite doubles, strings with
/// unrepresentable bytes, sign-magnitude minimums) are rejected by [push],
/// so serialization of an intact list cannot fail on a value.
///
/// [push]: Records::push
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Records {
    items: Vec<Value>,
}

impl Records {
    /// Creates an empty record list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value after checking it is encodable.
    pub fn push(&mut self, value: Value) -> Result<(), Error> {
        value.validate()?;
        self.items.push(value);
        Ok(())
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the record at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Returns the kind sequence of the list, usable as a decode template.
    pub fn kinds(&self) -> Vec<Kind> {
        self.items.iter().map(Value::kind).collect()
    }
}

impl From<Records> for Vec<Value> {
    fn from(records: Records) -> Self {
        records.items
    }
}

impl TryFrom<Vec<Value>> for Records {
    type Error = Error;

    fn try_from(items: Vec<Value>) -> Result<Self, Error> {
        let mut records = Records::new();
        for value in items {
            records.push(value)?;
        }
        Ok(records)
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Encodes one value, headered, onto the accumulator.
pub fn write_value(bits: &mut BitQueue, value: &Value) -> Result<(), Error> {
    match value {
        Value::U8(v) => write_uint(bits, *v as u64, Width::W8, true),
        Value::U16(v) => write_uint(bits, *v as u64, Width::W16, true),
        Value::U32(v) => write_uint(bits, *v as u64, Width::W32, true),
        Value::U64(v) => write_uint(bits, *v, Width::W64, true),
        Value::I8(v) => write_int(bits, *v as i64, Width::W8, true),
        Value::I16(v) => write_int(bits, *v as i64, Width::W16, true),
        Value::I32(v) => write_int(bits, *v as i64, Width::W32, true),
        Value::I64(v) => write_int(bits, *v, Width::W64, true),
        Value::Double(v) => write_double(bits, *v),
        Value::Str(v) => write_str(bits, v),
        Value::Bool(v) => {
            write_bool(bits, *v);
            Ok(())
        }
    }
}

/// Decodes one value of the given kind from the reader.
pub fn read_value(reader: &mut BitReader, kind: Kind) -> Result<Value, Error> {
    Ok(match kind {
        Kind::U8 => Value::U8(read_uint(reader, Width::W8, true)? as u8),
        Kind::U16 => Value::U16(read_uint(reader, Width::W16, true)? as u16),
        Kind::U32 => Value::U32(read_uint(reader, Width::W32, true)? as u32),
        Kind::U64 => Value::U64(read_uint(reader, Width::W64, true)?),
        Kind::I8 => Value::I8(read_int(reader, Width::W8, true)? as i8),
        Kind::I16 => Value::I16(read_int(reader, Width::W16, true)? as i16),
        Kind::I32 => Value::I32(read_int(reader, Width::W32, true)? as i32),
        Kind::I64 => Value::I64(read_int(reader, Width::W64, true)?),
        Kind::Double => Value::Double(read_double(reader)?),
        Kind::Str => Value::Str(read_str(reader)?),
        Kind::Bool => Value::Bool(read_bool(reader)?),
    })
}

/// Serializes a record list to packed bytes.
///
/// An empty list is rejected: the format cannot frame zero fields.
pub fn serialize(records: &Records) -> Result<Bytes, Error> {
    if records.is_empty() {
        return Err(Error::Empty);
    }
    let mut bits = BitQueue::new();
    for value in records {
        write_value(&mut bits, value)?;
    }
    pack(bits)
}

/// Deserializes packed bytes into `out`, one value per template kind.
///
/// On failure, values decoded before the failing field remain in `out`, so
/// the caller can see how far the decode got.
pub fn deserialize_into(buf: &[u8], template: &[Kind], out: &mut Records) -> Result<(), Error> {
    if template.is_empty() {
        return Err(Error::Empty);
    }
    let bits = unpack(buf)?;
    let mut reader = BitReader::new(&bits);
    for &kind in template {
        let value = read_value(&mut reader, kind)?;
        out.push(value)?;
    }
    Ok(())
}

/// Deserializes packed bytes into a fresh record list.
pub fn deserialize(buf: &[u8], template: &[Kind]) -> Result<Records, Error> {
    let mut out = Records::new();
    deserialize_into(buf, template, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Records {
        let mut records = Records::new();
        records.push(Value::U8(5)).unwrap();
        records.push(Value::U16(300)).unwrap();
        records.push(Value::I32(-1234)).unwrap();
        records.push(Value::Double(1.5)).unwrap();
        records.push(Value::Str("hello".into())).unwrap();
        records.push(Value::Bool(true)).unwrap();
        records
    }

    #[test]
    fn test_roundtrip() {
        let records = sample();
        let bytes = serialize(&records).unwrap();
        let decoded = deserialize(&bytes, &records.kinds()).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_push_rejects_unencodable() {
        let mut records = Records::new();
        assert_eq!(
            records.push(Value::Double(f64::NAN)),
            Err(Error::NotFinite)
        );
        assert_eq!(
            records.push(Value::I8(i8::MIN)),
            Err(Error::ValueOutOfRange { bits: 8 })
        );
        assert_eq!(
            records.push(Value::Str("a\0b".into())),
            Err(Error::InvalidString("contains NUL byte"))
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(serialize(&Records::new()), Err(Error::Empty));

        let mut out = Records::new();
        assert_eq!(deserialize_into(&[0x01], &[], &mut out), Err(Error::Empty));
    }

    #[test]
    fn test_partial_output_on_failure() {
        // Encode three values but decode with a template whose third kind
        // demands more bits than remain: the first two survive in `out`.
        let mut records = Records::new();
        records.push(Value::U8(5)).unwrap();
        records.push(Value::U16(300)).unwrap();
        records.push(Value::Bool(true)).unwrap();
        let bytes = serialize(&records).unwrap();

        let mut out = Records::new();
        let result = deserialize_into(&bytes, &[Kind::U8, Kind::U16, Kind::Str], &mut out);
        assert_eq!(result, Err(Error::EndOfBits));
        assert_eq!(out.len(), 2);
        assert_eq!(out.get(0), Some(&Value::U8(5)));
        assert_eq!(out.get(1), Some(&Value::U16(300)));
    }

    #[test]
    fn test_wrong_template_changes_values() {
        // The stream is self-describing in width, not in kind: a mismatched
        // template either fails or yields different values.
        let mut records = Records::new();
        records.push(Value::U16(300)).unwrap();
        let bytes = serialize(&records).unwrap();
        let decoded = deserialize(&bytes, &[Kind::U8]);
        assert_ne!(decoded, Ok(records));
    }

    #[test]
    fn test_single_bool_message() {
        let mut records = Records::new();
        records.push(Value::Bool(true)).unwrap();
        let bytes = serialize(&records).unwrap();
        // One payload bit, seven pad bits, one header byte.
        assert_eq!(bytes.len(), 2);
        let decoded = deserialize(&bytes, &[Kind::Bool]).unwrap();
        assert_eq!(decoded.get(0), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::U8(5).as_u8(), Some(5));
        assert_eq!(Value::U8(5).as_u16(), None);
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::Double(1.5).kind(), Kind::Double);
    }

    #[test]
    fn test_try_from_vec() {
        let records = Records::try_from(vec![Value::U8(1), Value::Bool(false)]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.kinds(), vec![Kind::U8, Kind::Bool]);

        assert_eq!(
            Records::try_from(vec![Value::Double(f64::INFINITY)]),
            Err(Error::NotFinite)
        );
    }
}
