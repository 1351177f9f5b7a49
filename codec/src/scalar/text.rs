//! String encoding and decoding.
//!
//! A string travels as a headered 16-bit unsigned byte length followed by
//! one headerless signed 8-bit field per byte. Two byte values have no
//! representation: `0x00` (the length already delimits the string, so a NUL
//! is treated as corruption on decode) and `0x80` (sign-magnitude `i8`
//! cannot carry -128, so encoding rejects it up front).

use crate::{
    header::Width,
    scalar::int::{read_int, read_uint, write_int, write_uint},
    BitQueue, BitReader, Error,
};

/// The longest encodable string in bytes, bounded by the 16-bit length
/// field.
pub const MAX_STRING_BYTES: usize = 65_534;

/// Checks that `value` is encodable: within the length cap and free of the
/// two unrepresentable byte values.
pub fn validate_str(value: &str) -> Result<(), Error> {
    if value.len() > MAX_STRING_BYTES {
        return Err(Error::StringTooLong(value.len()));
    }
    for byte in value.bytes() {
        if byte == 0x00 {
            return Err(Error::InvalidString("contains NUL byte"));
        }
        if byte == 0x80 {
            return Err(Error::InvalidString("contains unencodable byte 0x80"));
        }
    }
    Ok(())
}

/// Encodes a string: headered 16-bit unsigned byte length, then each byte
/// as a headerless signed 8-bit field. Validation happens before anything
/// is written.
pub fn write_str(bits: &mut BitQueue, value: &str) -> Result<(), Error> {
    validate_str(value)?;
    write_uint(bits, value.len() as u64, Width::W16, true)?;
    for byte in value.bytes() {
        write_int(bits, (byte as i8) as i64, Width::W8, false)?;
    }
    Ok(())
}

/// Decodes a string. A NUL byte or a payload that is not valid UTF-8 is
/// reported as corruption.
pub fn read_str(reader: &mut BitReader) -> Result<String, Error> {
    let length = read_uint(reader, Width::W16, true)?;
    let mut bytes = Vec::with_capacity(length as usize);
    for _ in 0..length {
        let byte = read_int(reader, Width::W8, false)? as i8;
        if byte == 0 {
            return Err(Error::InvalidString("contains NUL byte"));
        }
        bytes.push(byte as u8);
    }
    String::from_utf8(bytes).map_err(|_| Error::InvalidString("not valid UTF-8"))
}
