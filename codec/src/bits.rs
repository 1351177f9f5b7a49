//! Bit accumulator and decode cursor.
//!
//! [BitQueue] is a compact, ordered sequence of bits packed into [u8] blocks,
//! LSB-first within each block: the bit at index `i` lives in block `i / 8`
//! at bit position `i % 8`. This matches the wire's bit order, so byte
//! packing is a direct block fold. A head offset over a `VecDeque` of blocks
//! keeps append and remove O(1) at both ends.
//!
//! [BitReader] is a resumable cursor over a [BitQueue]: a decode sequence
//! threads one reader through consecutive field decoders, each consuming
//! exactly the bits it needs.

use crate::Error;
use core::fmt::{self, Formatter, Write as _};
use std::collections::VecDeque;

/// Type alias for the underlying block type.
type Block = u8;

/// Number of bits in a [Block].
const BITS_PER_BLOCK: usize = Block::BITS as usize;

/// A growable sequence of bits supporting O(1) append/remove at either end.
#[derive(Clone, Default)]
pub struct BitQueue {
    /// The underlying storage for the bits.
    storage: VecDeque<Block>,
    /// Number of unused bit slots at the front of the first block.
    ///
    /// Always less than [BITS_PER_BLOCK]; zero when the queue is empty.
    head_offset: usize,
    /// The total number of bits.
    num_bits: usize,
}

impl BitQueue {
    /// Creates a new, empty `BitQueue`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `BitQueue` with the specified capacity in bits.
    #[inline]
    pub fn with_capacity(size: usize) -> Self {
        BitQueue {
            storage: VecDeque::with_capacity(size.div_ceil(BITS_PER_BLOCK)),
            head_offset: 0,
            num_bits: 0,
        }
    }

    /// Returns the number of bits in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_bits
    }

    /// Returns true if the queue contains no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Appends a bit at the tail.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        if self.block_of(self.num_bits) == self.storage.len() {
            self.storage.push_back(0);
        }
        self.num_bits += 1;
        self.set_bit_to(self.num_bits - 1, bit);
    }

    /// Appends a bit at the head.
    #[inline]
    pub fn push_front(&mut self, bit: bool) {
        if self.head_offset == 0 {
            self.storage.push_front(0);
            self.head_offset = BITS_PER_BLOCK;
        }
        self.head_offset -= 1;
        self.num_bits += 1;
        self.set_bit_to(0, bit);
    }

    /// Removes the last bit and returns it.
    ///
    /// Returns `None` if the queue is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<bool> {
        if self.num_bits == 0 {
            return None;
        }
        let bit = self.get_bit(self.num_bits - 1);
        self.num_bits -= 1;
        self.shrink_back();
        Some(bit)
    }

    /// Removes `count` bits from the head.
    ///
    /// Fails with [Error::EndOfBits] if fewer than `count` bits are present,
    /// leaving the queue unchanged.
    pub fn drain_front(&mut self, count: usize) -> Result<(), Error> {
        if count > self.num_bits {
            return Err(Error::EndOfBits);
        }
        self.head_offset += count;
        self.num_bits -= count;
        while self.head_offset >= BITS_PER_BLOCK {
            self.storage.pop_front();
            self.head_offset -= BITS_PER_BLOCK;
        }
        if self.num_bits == 0 {
            self.reset();
        }
        Ok(())
    }

    /// Removes `count` bits from the tail.
    ///
    /// Fails with [Error::EndOfBits] if fewer than `count` bits are present,
    /// leaving the queue unchanged.
    pub fn truncate_back(&mut self, count: usize) -> Result<(), Error> {
        if count > self.num_bits {
            return Err(Error::EndOfBits);
        }
        self.num_bits -= count;
        self.shrink_back();
        Ok(())
    }

    /// Moves every bit of `other` to the tail of `self`, preserving order.
    ///
    /// `other` is left empty.
    pub fn append(&mut self, other: &mut BitQueue) {
        self.storage
            .reserve(other.num_bits.div_ceil(BITS_PER_BLOCK));
        for i in 0..other.num_bits {
            self.push(other.get_bit(i));
        }
        other.reset();
    }

    /// Removes all bits.
    #[inline]
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Gets the value of the bit at `index` (true if 1, false if 0).
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.num_bits {
            return None;
        }
        Some(self.get_bit(index))
    }

    /// Creates an iterator over the bits.
    pub fn iter(&self) -> BitIter<'_> {
        BitIter { bits: self, pos: 0 }
    }

    // ---------- Helper Functions ----------

    /// Calculates the block holding the bit at logical `index`.
    #[inline(always)]
    fn block_of(&self, index: usize) -> usize {
        (self.head_offset + index) / BITS_PER_BLOCK
    }

    /// Calculates the bit offset within that block.
    #[inline(always)]
    fn offset_of(&self, index: usize) -> usize {
        (self.head_offset + index) % BITS_PER_BLOCK
    }

    #[inline(always)]
    fn get_bit(&self, index: usize) -> bool {
        (self.storage[self.block_of(index)] >> self.offset_of(index)) & 1 == 1
    }

    /// Sets the bit at `index` to `bit`, clearing any stale value left in the
    /// block by an earlier removal.
    #[inline(always)]
    fn set_bit_to(&mut self, index: usize, bit: bool) {
        let (block, offset) = (self.block_of(index), self.offset_of(index));
        if bit {
            self.storage[block] |= 1 << offset;
        } else {
            self.storage[block] &= !(1 << offset);
        }
    }

    /// Drops blocks past the last live bit.
    #[inline]
    fn shrink_back(&mut self) {
        if self.num_bits == 0 {
            self.reset();
            return;
        }
        let needed = (self.head_offset + self.num_bits).div_ceil(BITS_PER_BLOCK);
        self.storage.truncate(needed);
    }

    #[inline]
    fn reset(&mut self) {
        self.storage.clear();
        self.head_offset = 0;
        self.num_bits = 0;
    }
}

// ---------- Constructors ----------

impl FromIterator<bool> for BitQueue {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bits = Self::with_capacity(iter.size_hint().0);
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl From<&[bool]> for BitQueue {
    fn from(bools: &[bool]) -> Self {
        bools.iter().copied().collect()
    }
}

impl<const N: usize> From<[bool; N]> for BitQueue {
    fn from(bools: [bool; N]) -> Self {
        bools.into_iter().collect()
    }
}

// ---------- Comparisons ----------

impl PartialEq for BitQueue {
    fn eq(&self, other: &Self) -> bool {
        self.num_bits == other.num_bits && self.iter().eq(other.iter())
    }
}

impl Eq for BitQueue {}

// ---------- Debug ----------

impl fmt::Debug for BitQueue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // For very large queues, only show a preview
        const MAX_DISPLAY: usize = 64;
        const HALF_DISPLAY: usize = MAX_DISPLAY / 2;

        let write_bit = |f: &mut Formatter<'_>, index: usize| -> fmt::Result {
            f.write_char(if self.get_bit(index) { '1' } else { '0' })
        };

        f.write_str("BitQueue[")?;
        if self.num_bits <= MAX_DISPLAY {
            for i in 0..self.num_bits {
                write_bit(f, i)?;
            }
        } else {
            for i in 0..HALF_DISPLAY {
                write_bit(f, i)?;
            }
            f.write_str("...")?;
            for i in (self.num_bits - HALF_DISPLAY)..self.num_bits {
                write_bit(f, i)?;
            }
        }
        f.write_str("]")
    }
}

// ---------- Iterator ----------

/// Iterator over the bits of a [BitQueue].
pub struct BitIter<'a> {
    bits: &'a BitQueue,
    pos: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.num_bits - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIter<'_> {}

impl<'a> IntoIterator for &'a BitQueue {
    type Item = bool;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------- Reader ----------

/// A resumable decode position within a [BitQueue].
///
/// Field decoders take `&mut BitReader` and consume exactly the bits they
/// need, so a record's fields can be decoded in sequence without rescanning.
pub struct BitReader<'a> {
    bits: &'a BitQueue,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `bits`.
    pub fn new(bits: &'a BitQueue) -> Self {
        BitReader { bits, pos: 0 }
    }

    /// Returns the next bit, advancing the cursor.
    #[inline]
    pub fn next_bit(&mut self) -> Result<bool, Error> {
        let bit = self.bits.get(self.pos).ok_or(Error::EndOfBits)?;
        self.pos += 1;
        Ok(bit)
    }

    /// Reads `count` bits (at most 64) as an LSB-first unsigned value.
    pub fn take(&mut self, count: usize) -> Result<u64, Error> {
        debug_assert!(count <= u64::BITS as usize);
        if count > self.remaining() {
            return Err(Error::EndOfBits);
        }
        let mut value = 0u64;
        for i in 0..count {
            if self.bits.get_bit(self.pos + i) {
                value |= 1 << i;
            }
        }
        self.pos += count;
        Ok(value)
    }

    /// Returns the number of bits left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bits.num_bits - self.pos
    }

    /// Returns the absolute bit position of the cursor.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}
