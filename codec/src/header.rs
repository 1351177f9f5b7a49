//! Width classes and self-describing size headers.
//!
//! Every headered field is prefixed by a small count of "how many bits
//! follow". Because each width class's maximum count is a power of two,
//! biasing the stored value by -1 lets the header span exactly `[1, W]`
//! in `ceil(log2(W))` bits, with no escape sequences or continuation bits.

use crate::{BitQueue, BitReader, Error};

/// A declared field width: one of 8, 16, 32, or 64 bits.
///
/// The width bounds a field's magnitude and fixes the bit-width of its
/// size header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// All width classes, narrowest first.
    pub const ALL: [Width; 4] = [Width::W8, Width::W16, Width::W32, Width::W64];

    /// The declared field width in bits; also the maximum header value.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// The number of bits a size header of this class occupies on the wire.
    #[inline]
    pub const fn header_bits(self) -> u32 {
        match self {
            Width::W8 => 3,
            Width::W16 => 4,
            Width::W32 => 5,
            Width::W64 => 6,
        }
    }

    /// The largest unsigned value the width can carry.
    #[inline]
    pub const fn max_unsigned(self) -> u64 {
        match self {
            Width::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// The largest magnitude a sign-magnitude signed value of this width can
    /// carry (one bit is spent on the sign).
    #[inline]
    pub const fn max_signed_magnitude(self) -> u64 {
        (1u64 << (self.bits() - 1)) - 1
    }
}

/// Writes `count` (in `[1, W]`) as a biased, LSB-first size header.
pub fn write_header(bits: &mut BitQueue, count: u32, width: Width) -> Result<(), Error> {
    if count == 0 || count > width.bits() {
        return Err(Error::InvalidHeader(count));
    }
    let mut biased = count - 1;
    for _ in 0..width.header_bits() {
        bits.push(biased & 1 == 1);
        biased >>= 1;
    }
    Ok(())
}

/// Reads a size header of the given class, returning the recovered count.
///
/// The bias makes 0 unrepresentable, so a successfully read header is
/// always in `[1, W]`.
pub fn read_header(reader: &mut BitReader, width: Width) -> Result<u32, Error> {
    let biased = reader.take(width.header_bits() as usize)? as u32;
    Ok(biased + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Width::W8, 3)]
    #[test_case(Width::W16, 4)]
    #[test_case(Width::W32, 5)]
    #[test_case(Width::W64, 6)]
    fn test_header_bits(width: Width, expected: u32) {
        assert_eq!(width.header_bits(), expected);
    }

    #[test]
    fn test_header_roundtrip() {
        for width in Width::ALL {
            for count in 1..=width.bits() {
                let mut bits = BitQueue::new();
                write_header(&mut bits, count, width).unwrap();
                assert_eq!(bits.len(), width.header_bits() as usize);

                let mut reader = BitReader::new(&bits);
                assert_eq!(read_header(&mut reader, width), Ok(count));
                assert_eq!(reader.remaining(), 0);
            }
        }
    }

    #[test]
    fn test_header_bounds() {
        for width in Width::ALL {
            let mut bits = BitQueue::new();
            assert_eq!(
                write_header(&mut bits, 0, width),
                Err(Error::InvalidHeader(0))
            );
            assert_eq!(
                write_header(&mut bits, width.bits() + 1, width),
                Err(Error::InvalidHeader(width.bits() + 1))
            );
            assert!(bits.is_empty());
        }
    }

    #[test]
    fn test_header_bit_pattern() {
        // count 3 in the 8-bit class: biased to 2, LSB-first over 3 bits
        let mut bits = BitQueue::new();
        write_header(&mut bits, 3, Width::W8).unwrap();
        assert_eq!(bits, BitQueue::from([false, true, false]));
    }

    #[test]
    fn test_header_truncated() {
        let mut bits = BitQueue::new();
        write_header(&mut bits, 5, Width::W32).unwrap();
        bits.truncate_back(1).unwrap();
        let mut reader = BitReader::new(&bits);
        assert_eq!(read_header(&mut reader, Width::W32), Err(Error::EndOfBits));
    }
}
