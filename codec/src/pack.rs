//! Byte-boundary packing.
//!
//! A bit stream rarely ends on a byte boundary, so packing prepends one
//! header byte holding `pad + 1`, where `pad` is the number of zero bits
//! appended to round the total (header included) up to a whole number of
//! bytes. Bits fill each byte LSB-first. The `+1` bias keeps the header
//! nonzero, so a zero first byte is immediately recognizable as corrupt.

use crate::{BitQueue, BitReader, Error};
use bytes::{BufMut, Bytes, BytesMut};

/// Packs a bit stream into whole bytes, consuming it.
///
/// An empty stream has nothing to frame and is rejected.
pub fn pack(mut bits: BitQueue) -> Result<Bytes, Error> {
    if bits.is_empty() {
        return Err(Error::Empty);
    }
    let pad = (8 - ((bits.len() + 8) % 8)) % 8;
    for _ in 0..pad {
        bits.push(false);
    }
    // The header byte leads the stream, LSB-first like everything else.
    let header = (pad + 1) as u8;
    for i in (0..8).rev() {
        bits.push_front((header >> i) & 1 == 1);
    }
    debug_assert_eq!(bits.len() % 8, 0);

    let mut out = BytesMut::with_capacity(bits.len() / 8);
    let mut byte = 0u8;
    for (i, bit) in bits.iter().enumerate() {
        if bit {
            byte |= 1 << (i % 8);
        }
        if i % 8 == 7 {
            out.put_u8(byte);
            byte = 0;
        }
    }
    Ok(out.freeze())
}

/// Unpacks bytes back into the bit stream `pack` consumed.
///
/// Fails on an empty buffer or a header byte outside `[1, 8]`.
pub fn unpack(buf: &[u8]) -> Result<BitQueue, Error> {
    if buf.is_empty() {
        return Err(Error::EndOfBits);
    }
    let mut bits = BitQueue::with_capacity(buf.len() * 8);
    for byte in buf {
        for i in 0..8 {
            bits.push((byte >> i) & 1 == 1);
        }
    }

    let mut reader = BitReader::new(&bits);
    let header = reader.take(8)? as u32;
    if !(1..=8).contains(&header) {
        return Err(Error::InvalidHeader(header));
    }
    let pad = (header - 1) as usize;
    bits.drain_front(8)?;
    if pad > bits.len() {
        return Err(Error::EndOfBits);
    }
    bits.truncate_back(pad)?;
    Ok(bits)
}
