//! Integer encoding and decoding.
//!
//! Unsigned values are carried as their minimal LSB-first magnitude bits;
//! signed values are sign-magnitude, with the sign bit always present and
//! never covered by the header. With a header, the magnitude occupies only
//! the bits it needs; without one, it is zero-padded to the full declared
//! width so the decoder can assume it.
//!
//! Wire order: `[header?][sign bit if signed][magnitude bits]`.

use super::{magnitude_bits, push_magnitude};
use crate::{
    header::{read_header, write_header},
    BitQueue, BitReader, Error, Width,
};
use paste::paste;

/// Encodes an unsigned integer.
///
/// Values needing more than `width.bits()` magnitude bits are rejected
/// before anything is written. Zero is carried as a single `0` bit.
pub fn write_uint(
    bits: &mut BitQueue,
    value: u64,
    width: Width,
    headered: bool,
) -> Result<(), Error> {
    if value > width.max_unsigned() {
        return Err(Error::ValueOutOfRange { bits: width.bits() });
    }
    let count = magnitude_bits(value);
    if headered {
        write_header(bits, count, width)?;
    }
    push_magnitude(bits, value, count);
    if !headered {
        for _ in count..width.bits() {
            bits.push(false);
        }
    }
    Ok(())
}

/// Decodes an unsigned integer.
///
/// With a header, reads the magnitude bit count first; without one, assumes
/// the full declared width.
pub fn read_uint(reader: &mut BitReader, width: Width, headered: bool) -> Result<u64, Error> {
    let count = if headered {
        read_header(reader, width)?
    } else {
        width.bits()
    };
    reader.take(count as usize)
}

/// Encodes a signed integer as sign-magnitude.
///
/// The magnitude must fit in `width.bits() - 1` bits, so `-(2^(W-1))` is
/// rejected along with anything larger; there is no two's-complement
/// wraparound. The header, when present, covers the magnitude bit count
/// only.
pub fn write_int(bits: &mut BitQueue, value: i64, width: Width, headered: bool) -> Result<(), Error> {
    let magnitude = value.unsigned_abs();
    if magnitude > width.max_signed_magnitude() {
        return Err(Error::ValueOutOfRange { bits: width.bits() });
    }
    let count = magnitude_bits(magnitude);
    if headered {
        write_header(bits, count, width)?;
    }
    bits.push(value < 0);
    push_magnitude(bits, magnitude, count);
    if !headered {
        for _ in count..(width.bits() - 1) {
            bits.push(false);
        }
    }
    Ok(())
}

/// Decodes a sign-magnitude signed integer.
///
/// A header can claim up to `width.bits()` magnitude bits, one more than a
/// signed field may legally carry, so the recovered magnitude is checked
/// against the signed cap.
pub fn read_int(reader: &mut BitReader, width: Width, headered: bool) -> Result<i64, Error> {
    let count = if headered {
        read_header(reader, width)?
    } else {
        width.bits() - 1
    };
    let negative = reader.next_bit()?;
    let magnitude = reader.take(count as usize)?;
    if magnitude > width.max_signed_magnitude() {
        return Err(Error::ValueOutOfRange { bits: width.bits() });
    }
    let value = magnitude as i64;
    Ok(if negative { -value } else { value })
}

// Typed wrappers for each primitive width.
macro_rules! impl_uint_codec {
    ($type:ty, $width:expr) => {
        paste! {
            #[doc = "Encodes a `" $type "` (see [write_uint])."]
            pub fn [<write_ $type>](
                bits: &mut BitQueue,
                value: $type,
                headered: bool,
            ) -> Result<(), Error> {
                write_uint(bits, value as u64, $width, headered)
            }

            #[doc = "Decodes a `" $type "` (see [read_uint])."]
            pub fn [<read_ $type>](
                reader: &mut BitReader,
                headered: bool,
            ) -> Result<$type, Error> {
                // The header cannot claim more bits than the width allows.
                Ok(read_uint(reader, $width, headered)? as $type)
            }
        }
    };
}

macro_rules! impl_int_codec {
    ($type:ty, $width:expr) => {
        paste! {
            #[doc = "Encodes an `" $type "` (see [write_int])."]
            pub fn [<write_ $type>](
                bits: &mut BitQueue,
                value: $type,
                headered: bool,
            ) -> Result<(), Error> {
                write_int(bits, value as i64, $width, headered)
            }

            #[doc = "Decodes an `" $type "` (see [read_int])."]
            pub fn [<read_ $type>](
                reader: &mut BitReader,
                headered: bool,
            ) -> Result<$type, Error> {
                // The magnitude check bounds the value within the type.
                Ok(read_int(reader, $width, headered)? as $type)
            }
        }
    };
}

impl_uint_codec!(u8, Width::W8);
impl_uint_codec!(u16, Width::W16);
impl_uint_codec!(u32, Width::W32);
impl_uint_codec!(u64, Width::W64);
impl_int_codec!(i8, Width::W8);
impl_int_codec!(i16, Width::W16);
impl_int_codec!(i32, Width::W32);
impl_int_codec!(i64, Width::W64);
