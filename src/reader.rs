//! Read-only bit stream over borrowed words.
//!
//! [`BitReader`] offers two ways in:
//!
//! - **Block reads** (`read_u8` .. `read_u64`) address fixed-size groups of
//!   bits by index. They never fail on range: bits past the logical end read
//!   as zero, so a truncated trailing field still decodes to a value.
//! - **Cursor reads** (`read_bit`, `read_bit_at`) consume the stream one bit
//!   at a time and report [`Error::EndOfStream`] at the logical end.
//!
//! # Example
//!
//! ```
//! use padded_bitstream::BitReader;
//!
//! let data = [0b1010_1100u8, 0b1110_0011];
//! let mut reader = BitReader::new(&data, 0, 0);
//!
//! assert_eq!(reader.read_u16(12, 0), 0b1010_1100_1110);
//! assert_eq!(reader.read_u8(4, 2), 0b1110);
//!
//! assert_eq!(reader.read_bit(), Ok(true));
//! assert_eq!(reader.read_bit(), Ok(false));
//! assert_eq!(reader.position(), 2);
//! ```

use core::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::word::Word;
use crate::Padding;

/// A bit stream view over a slice of words.
///
/// The reader never mutates its data. It holds no lock, so sharing one reader
/// between threads requires external synchronization; independent readers
/// over the same slice need none.
#[derive(Clone, Debug)]
pub struct BitReader<'a, W: Word> {
    data: &'a [W],
    geometry: Geometry<W>,
    /// Logical bit count
    bits: usize,
    /// Cursor for `read_bit`
    pos: usize,
}

impl<'a, W: Word> BitReader<'a, W> {
    /// Create a reader over `data`, skipping `left_pad` high bits and
    /// `right_pad` low bits of every word.
    ///
    /// The logical length starts at `data.len() * (W::BITS - left_pad - right_pad)`.
    ///
    /// # Panics
    ///
    /// Panics if `left_pad + right_pad >= W::BITS`, as that would leave no
    /// bits to read.
    pub fn new(data: &'a [W], left_pad: u32, right_pad: u32) -> Self {
        match Self::try_new(data, left_pad, right_pad) {
            Ok(reader) => reader,
            Err(err) => panic!("{}", err),
        }
    }

    /// Like [`BitReader::new`], but returns [`Error::InvalidPadding`] instead
    /// of panicking.
    pub fn try_new(data: &'a [W], left_pad: u32, right_pad: u32) -> Result<Self> {
        Self::with_padding(data, Padding::new(left_pad, right_pad))
    }

    /// Create a reader from a [`Padding`] value.
    pub fn with_padding(data: &'a [W], padding: Padding) -> Result<Self> {
        let geometry = Geometry::new(padding)?;
        Ok(Self {
            data,
            bits: geometry.capacity(data.len()),
            geometry,
            pos: 0,
        })
    }

    /// Limit the logical length to `bits`.
    ///
    /// Data beyond the limit reads as zero in block reads and as end of
    /// stream in cursor reads. The limit is clamped to [`capacity`]; the
    /// underlying data is untouched.
    ///
    /// [`capacity`]: BitReader::capacity
    pub fn limit_bits(&mut self, bits: usize) {
        let capacity = self.capacity();
        if bits > capacity {
            log::debug!(
                "bit limit {} exceeds capacity {}, clamping",
                bits,
                capacity
            );
        }
        self.bits = bits.min(capacity);
    }

    /// Logical length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits
    }

    /// Returns true if the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of addressable bits in the underlying data.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.geometry.capacity(self.data.len())
    }

    /// The underlying words.
    #[inline]
    pub fn data(&self) -> &'a [W] {
        self.data
    }

    /// The padding this reader skips in every word.
    #[inline]
    pub fn padding(&self) -> Padding {
        self.geometry.padding()
    }

    /// Usable bits per word.
    #[inline]
    pub fn span(&self) -> usize {
        self.geometry.span()
    }

    /// Read `bits` bits of block `n` into a `u8`, right-aligned.
    ///
    /// Block `n` covers logical bits `[n * bits, n * bits + bits)`. Bits past
    /// the logical end read as zero.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 8`.
    pub fn read_u8(&self, bits: u32, n: usize) -> u8 {
        assert!(bits <= 8, "cannot read {} bits into u8", bits);
        self.read_block(bits, n) as u8
    }

    /// Read `bits` bits of block `n` into a `u16`, right-aligned.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 16`.
    pub fn read_u16(&self, bits: u32, n: usize) -> u16 {
        assert!(bits <= 16, "cannot read {} bits into u16", bits);
        self.read_block(bits, n) as u16
    }

    /// Read `bits` bits of block `n` into a `u32`, right-aligned.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 32`.
    pub fn read_u32(&self, bits: u32, n: usize) -> u32 {
        assert!(bits <= 32, "cannot read {} bits into u32", bits);
        self.read_block(bits, n) as u32
    }

    /// Read `bits` bits of block `n` into a `u64`, right-aligned.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 64`.
    pub fn read_u64(&self, bits: u32, n: usize) -> u64 {
        assert!(bits <= 64, "cannot read {} bits into u64", bits);
        self.read_block(bits, n)
    }

    fn read_block(&self, bits: u32, n: usize) -> u64 {
        let width = bits as usize;
        let start = n.saturating_mul(width).min(self.bits);
        let end = start.saturating_add(width).min(self.bits);

        let mut value = 0u64;
        for i in start..end {
            value = (value << 1) | u64::from(self.geometry.get(self.data, i));
        }
        // Zero-fill whatever the stream could not supply
        let missing = (width - (end - start)) as u32;
        value.checked_shl(missing).unwrap_or(0)
    }

    /// Read the bit at the cursor and advance it.
    ///
    /// Returns [`Error::EndOfStream`] without moving the cursor if it is at
    /// or past the logical end.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self.bit(self.pos)?;
        self.pos += 1;
        Ok(bit)
    }

    /// Read the bit at `pos` without moving the cursor.
    pub fn read_bit_at(&self, pos: isize) -> Result<bool> {
        let pos = usize::try_from(pos).map_err(|_| Error::InvalidPosition(pos))?;
        self.bit(pos)
    }

    #[inline]
    fn bit(&self, pos: usize) -> Result<bool> {
        if pos >= self.bits {
            return Err(Error::EndOfStream {
                pos,
                len: self.bits,
            });
        }
        Ok(self.geometry.get(self.data, pos))
    }

    /// Move the cursor to `pos`.
    ///
    /// Any non-negative position is accepted, even past the logical end;
    /// reads from there report [`Error::EndOfStream`].
    pub fn seek(&mut self, pos: isize) -> Result<()> {
        self.pos = usize::try_from(pos).map_err(|_| Error::InvalidPosition(pos))?;
        Ok(())
    }

    /// Current cursor position in bits.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits between the cursor and the logical end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bits.saturating_sub(self.pos)
    }

    /// Iterate over all logical bits from position 0. The cursor is not used.
    pub fn iter(&self) -> BitIter<'a, W> {
        BitIter {
            data: self.data,
            geometry: self.geometry,
            next: 0,
            end: self.bits,
        }
    }
}

impl<'a, W: Word> IntoIterator for &BitReader<'a, W> {
    type Item = bool;
    type IntoIter = BitIter<'a, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the logical bits of a [`BitReader`].
#[derive(Clone, Debug)]
pub struct BitIter<'a, W: Word> {
    data: &'a [W],
    geometry: Geometry<W>,
    next: usize,
    end: usize,
}

impl<W: Word> Iterator for BitIter<'_, W> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.next >= self.end {
            return None;
        }
        let bit = self.geometry.get(self.data, self.next);
        self.next += 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl<W: Word> ExactSizeIterator for BitIter<'_, W> {}

impl<W: Word> FusedIterator for BitIter<'_, W> {}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [u8; 4] = [0b1010_1100, 0b1110_0011, 0b1100_0011, 0b1110_0000];

    #[test]
    fn test_initial_state() {
        let reader = BitReader::new(&DATA, 0, 0);
        assert_eq!(reader.len(), 32);
        assert_eq!(reader.capacity(), 32);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.span(), 8);
        assert_eq!(reader.data(), &DATA);
        assert!(!reader.is_empty());

        let reader = BitReader::new(&DATA, 2, 1);
        assert_eq!(reader.len(), 20);
        assert_eq!(reader.padding(), Padding::new(2, 1));
    }

    #[test]
    fn test_empty_data() {
        let reader = BitReader::<u32>::new(&[], 0, 0);
        assert!(reader.is_empty());
        assert_eq!(reader.read_u32(32, 0), 0);
        assert!(reader.read_bit_at(0).unwrap_err().is_end_of_stream());
    }

    #[test]
    #[should_panic(expected = "padding sum must be less than word bit size")]
    fn test_new_panics_on_full_padding() {
        BitReader::new(&[0xFFu8], 4, 4);
    }

    #[test]
    fn test_try_new_reports_padding() {
        assert_eq!(
            BitReader::try_new(&[0xFFu16], 10, 6).unwrap_err(),
            Error::InvalidPadding {
                left: 10,
                right: 6,
                width: 16
            }
        );
    }

    #[test]
    fn test_block_reads() {
        let reader = BitReader::new(&DATA, 0, 0);
        assert_eq!(reader.read_u16(12, 0), 0b1010_1100_1110);
        assert_eq!(reader.read_u16(12, 1), 0b0011_1100_0011);
        assert_eq!(reader.read_u8(4, 2), 0b1110);
        assert_eq!(reader.read_u32(32, 0), 0b1010_1100_1110_0011_1100_0011_1110_0000);
        assert_eq!(reader.read_u64(32, 0), 0b1010_1100_1110_0011_1100_0011_1110_0000);
    }

    #[test]
    fn test_block_read_zero_bits() {
        let reader = BitReader::new(&DATA, 0, 0);
        assert_eq!(reader.read_u8(0, 0), 0);
        assert_eq!(reader.read_u64(0, usize::MAX), 0);
    }

    #[test]
    fn test_block_read_zero_fills_short_tail() {
        let mut reader = BitReader::new(&DATA, 0, 0);
        reader.limit_bits(10);
        // bits 8..10 are "11", the other 6 are missing
        assert_eq!(reader.read_u8(8, 1), 0b1100_0000);
        assert_eq!(reader.read_u8(8, 2), 0);
        assert_eq!(reader.read_u64(64, 0), 0b1010_1100_11u64 << 54);
    }

    #[test]
    fn test_block_read_huge_index_does_not_overflow() {
        let reader = BitReader::new(&DATA, 0, 0);
        assert_eq!(reader.read_u16(16, usize::MAX), 0);
    }

    #[test]
    #[should_panic(expected = "cannot read 9 bits into u8")]
    fn test_read_u8_too_wide() {
        BitReader::new(&DATA, 0, 0).read_u8(9, 0);
    }

    #[test]
    #[should_panic(expected = "cannot read 65 bits into u64")]
    fn test_read_u64_too_wide() {
        BitReader::new(&DATA, 0, 0).read_u64(65, 0);
    }

    #[test]
    fn test_cursor_reads() {
        let data = [0b1010_0000u8];
        let mut reader = BitReader::new(&data, 0, 0);
        reader.limit_bits(3);
        assert_eq!(reader.read_bit(), Ok(true));
        assert_eq!(reader.read_bit(), Ok(false));
        assert_eq!(reader.read_bit(), Ok(true));
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), 0);

        assert_eq!(reader.read_bit(), Err(Error::EndOfStream { pos: 3, len: 3 }));
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_read_bit_at() {
        let reader = BitReader::new(&DATA, 0, 0);
        assert_eq!(reader.read_bit_at(0), Ok(true));
        assert_eq!(reader.read_bit_at(1), Ok(false));
        assert_eq!(reader.read_bit_at(31), Ok(false));
        assert_eq!(
            reader.read_bit_at(32),
            Err(Error::EndOfStream { pos: 32, len: 32 })
        );
        assert_eq!(reader.read_bit_at(-1), Err(Error::InvalidPosition(-1)));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_seek() {
        let mut reader = BitReader::new(&DATA, 0, 0);
        reader.seek(8).unwrap();
        assert_eq!(reader.read_bit(), Ok(true));
        assert_eq!(reader.position(), 9);

        reader.seek(1000).unwrap();
        assert_eq!(reader.position(), 1000);
        assert!(reader.read_bit().unwrap_err().is_end_of_stream());
        assert_eq!(reader.remaining(), 0);

        assert_eq!(reader.seek(-1), Err(Error::InvalidPosition(-1)));
        assert_eq!(reader.position(), 1000);
    }

    #[test]
    fn test_limit_bits_clamps_to_capacity() {
        let mut reader = BitReader::new(&DATA, 1, 0);
        assert_eq!(reader.capacity(), 28);
        reader.limit_bits(100);
        assert_eq!(reader.len(), 28);
        reader.limit_bits(5);
        assert_eq!(reader.len(), 5);
        assert!(reader.read_bit_at(5).unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_padded_cursor_reads_skip_padding() {
        // left pad 1: data bits are 010_1100, then 110_0011
        let mut reader = BitReader::new(&DATA[..2], 1, 0);
        let mut bits = Vec::new();
        while let Ok(bit) = reader.read_bit() {
            bits.push(bit as u8);
        }
        assert_eq!(bits, [0, 1, 0, 1, 1, 0, 0, 1, 1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_iter() {
        let mut reader = BitReader::new(&DATA[..1], 0, 0);
        reader.limit_bits(5);
        let bits: Vec<bool> = reader.iter().collect();
        assert_eq!(bits, [true, false, true, false, true]);
        assert_eq!(reader.iter().len(), 5);
        assert_eq!((&reader).into_iter().filter(|&b| b).count(), 3);
    }
}
