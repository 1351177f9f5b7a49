//! Scalar encoders and decoders.
//!
//! Each scalar kind is built from the bit accumulator and the size-header
//! codec: integers carry minimal-width magnitudes, doubles are split into a
//! mantissa bit string and a signed exponent, booleans are a bare bit, and
//! strings are a length plus headerless signed bytes.

use crate::{BitQueue, BitReader, Error};

pub mod float;
pub mod int;
pub mod text;

/// Encodes a boolean as exactly one bit, no header.
#[inline]
pub fn write_bool(bits: &mut BitQueue, value: bool) {
    bits.push(value);
}

/// Decodes a boolean from exactly one bit.
#[inline]
pub fn read_bool(reader: &mut BitReader) -> Result<bool, Error> {
    reader.next_bit()
}

/// The number of magnitude bits needed to represent `value` (at least 1:
/// zero is carried as a single `0` bit).
#[inline]
pub(crate) fn magnitude_bits(value: u64) -> u32 {
    if value == 0 {
        1
    } else {
        u64::BITS - value.leading_zeros()
    }
}

/// Appends `count` LSB-first magnitude bits of `value`.
#[inline]
pub(crate) fn push_magnitude(bits: &mut BitQueue, value: u64, count: u32) {
    let mut v = value;
    for _ in 0..count {
        bits.push(v & 1 == 1);
        v >>= 1;
    }
}
