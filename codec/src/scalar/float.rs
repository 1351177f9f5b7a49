//! Double encoding and decoding.
//!
//! A finite double is split `frexp`-style into a normalized mantissa
//! `m ∈ [0.5, 1) ∪ {0}` and an integer exponent `e` with `value = m * 2^e`.
//! The mantissa's fractional bits are extracted by repeated doubling and
//! terminate within 53 iterations for any finite IEEE double; the exponent
//! of any finite double fits a headered 16-bit signed field.
//!
//! Wire order: `[W64 header: fraction bit count][mantissa sign][fraction
//! bits][headered 16-bit signed exponent]`.

use crate::{
    header::{read_header, write_header},
    scalar::int::{read_int, write_int},
    BitQueue, BitReader, Error, Width,
};

/// Encodes a finite double. NaN and infinities are rejected before anything
/// is written.
pub fn write_double(bits: &mut BitQueue, value: f64) -> Result<(), Error> {
    if !value.is_finite() {
        return Err(Error::NotFinite);
    }
    let (mantissa, exponent) = frexp(value);

    // Extract the fraction bits first so the count is known for the header.
    // -0.0 compares equal to 0.0, so it encodes as a positive zero mantissa.
    let negative = mantissa < 0.0;
    let mut m = mantissa.abs();
    let mut fraction = Vec::new();
    if m == 0.0 {
        fraction.push(false);
    } else {
        while m != 0.0 {
            m *= 2.0;
            if m >= 1.0 {
                fraction.push(true);
                m -= 1.0;
            } else {
                fraction.push(false);
            }
        }
    }

    write_header(bits, fraction.len() as u32, Width::W64)?;
    bits.push(negative);
    for bit in fraction {
        bits.push(bit);
    }
    write_int(bits, exponent as i64, Width::W16, true)
}

/// Decodes a double: mantissa fraction bits, sign, then exponent.
pub fn read_double(reader: &mut BitReader) -> Result<f64, Error> {
    let count = read_header(reader, Width::W64)?;
    let negative = reader.next_bit()?;
    let mut mantissa = 0.0f64;
    for i in 0..count {
        if reader.next_bit()? {
            mantissa += pow2(-(i as i32) - 1);
        }
    }
    if negative {
        mantissa = -mantissa;
    }
    let exponent = read_int(reader, Width::W16, true)?;
    Ok(ldexp(mantissa, exponent as i32))
}

/// `2^e` for `e` in the normal range `[-1022, 1023]`.
#[inline]
fn pow2(e: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&e));
    f64::from_bits(((e + 1023) as u64) << 52)
}

/// Splits `x` into `(m, e)` with `x = m * 2^e` and `m ∈ [0.5, 1) ∪ {0}`
/// (sign preserved). Rust's std has no `frexp`.
fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 {
        return (x, 0);
    }
    let bits = x.to_bits();
    let raw_exponent = ((bits >> 52) & 0x7ff) as i32;
    if raw_exponent == 0 {
        // Subnormal: scale into the normal range first (exact, power of two)
        let (m, e) = frexp(x * pow2(64));
        return (m, e - 64);
    }
    let mantissa = f64::from_bits((bits & !(0x7ff << 52)) | (1022 << 52));
    (mantissa, raw_exponent - 1022)
}

/// `x * 2^e`, stepped through the representable power range so every value a
/// valid encode can produce (including subnormals) reconstructs exactly.
fn ldexp(x: f64, e: i32) -> f64 {
    let mut result = x;
    let mut e = e;
    while e > 1023 {
        result *= pow2(1023);
        e -= 1023;
    }
    while e < -1022 {
        result *= pow2(-1022);
        e += 1022;
    }
    result * pow2(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: f64) -> f64 {
        let mut bits = BitQueue::new();
        write_double(&mut bits, value).unwrap();
        let mut reader = BitReader::new(&bits);
        let decoded = read_double(&mut reader).unwrap();
        assert_eq!(reader.remaining(), 0);
        decoded
    }

    #[test]
    fn test_frexp() {
        assert_eq!(frexp(0.0), (0.0, 0));
        assert_eq!(frexp(1.0), (0.5, 1));
        assert_eq!(frexp(1.5), (0.75, 1));
        assert_eq!(frexp(-8.0), (-0.5, 4));
        assert_eq!(frexp(0.25), (0.5, -1));

        // Subnormal
        let (m, e) = frexp(f64::from_bits(1));
        assert_eq!(m, 0.5);
        assert_eq!(e, -1073);

        // The invariant m ∈ [0.5, 1) and exact reconstruction
        for x in [3.7, -123.456, 1e300, 1e-300, f64::MIN_POSITIVE] {
            let (m, e) = frexp(x);
            assert!((0.5..1.0).contains(&m.abs()));
            assert_eq!(ldexp(m, e), x);
        }
    }

    #[test]
    fn test_roundtrip_exact() {
        let values = [
            0.0,
            1.0,
            1.5,
            -1.5,
            -123.456,
            1e300,
            -1e300,
            1e-300,
            f64::MIN_POSITIVE,
            f64::MAX,
            f64::MIN,
            f64::from_bits(1), // smallest subnormal
            0.1,
        ];
        for value in values {
            let decoded = roundtrip(value);
            assert_eq!(
                decoded.to_bits(),
                value.to_bits(),
                "roundtrip of {value} produced {decoded}"
            );
        }
    }

    #[test]
    fn test_negative_zero_becomes_positive() {
        let decoded = roundtrip(-0.0);
        assert_eq!(decoded, 0.0);
        assert!(decoded.is_sign_positive());
    }

    #[test]
    fn test_non_finite_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut bits = BitQueue::new();
            assert_eq!(write_double(&mut bits, value), Err(Error::NotFinite));
            assert!(bits.is_empty());
        }
    }

    #[test]
    fn test_zero_encoding_width() {
        // header(1) over W64 = 6 bits, sign, one fraction bit, then the
        // exponent: header(1) over W16 = 4 bits, sign, one magnitude bit
        let mut bits = BitQueue::new();
        write_double(&mut bits, 0.0).unwrap();
        assert_eq!(bits.len(), 6 + 1 + 1 + 4 + 1 + 1);
    }

    #[test]
    fn test_truncated_input() {
        let mut bits = BitQueue::new();
        write_double(&mut bits, -123.456).unwrap();
        bits.truncate_back(3).unwrap();
        let mut reader = BitReader::new(&bits);
        assert_eq!(read_double(&mut reader), Err(Error::EndOfBits));
    }
}
