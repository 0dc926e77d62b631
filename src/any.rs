//! Width-erased word buffers.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::word::Word;

/// A word buffer whose word width is only known at runtime.
///
/// Produced by [`BitWriter::any_data`](crate::BitWriter::any_data) for code
/// that handles streams of several widths through one type.
///
/// # Example
///
/// ```
/// use padded_bitstream::{AnyData, BitReader};
///
/// let any = AnyData::U16(vec![0b1010_1100_1110_0011]);
/// assert_eq!(any.word_bits(), 16);
///
/// let words = any.as_words::<u16>().unwrap();
/// let reader = BitReader::new(words, 0, 0);
/// assert_eq!(reader.read_u8(4, 0), 0b1010);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnyData {
    /// 8-bit words
    U8(Vec<u8>),
    /// 16-bit words
    U16(Vec<u16>),
    /// 32-bit words
    U32(Vec<u32>),
    /// 64-bit words
    U64(Vec<u64>),
    /// Platform-width words
    Usize(Vec<usize>),
}

impl AnyData {
    /// Wraps a typed word vector.
    #[inline]
    pub fn new<W: Word>(words: Vec<W>) -> Self {
        W::into_any(words)
    }

    /// Width of one word in bits.
    pub fn word_bits(&self) -> u32 {
        match self {
            AnyData::U8(_) => u8::BITS,
            AnyData::U16(_) => u16::BITS,
            AnyData::U32(_) => u32::BITS,
            AnyData::U64(_) => u64::BITS,
            AnyData::Usize(_) => usize::BITS,
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        match self {
            AnyData::U8(w) => w.len(),
            AnyData::U16(w) => w.len(),
            AnyData::U32(w) => w.len(),
            AnyData::U64(w) => w.len(),
            AnyData::Usize(w) => w.len(),
        }
    }

    /// Returns true if there are no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the words as `&[W]`, or `None` if the width differs.
    #[inline]
    pub fn as_words<W: Word>(&self) -> Option<&[W]> {
        W::from_any_ref(self)
    }

    /// Takes the words as `Vec<W>`, handing `self` back if the width differs.
    #[inline]
    pub fn into_words<W: Word>(self) -> Result<Vec<W>, AnyData> {
        W::from_any(self)
    }
}

impl<W: Word> From<Vec<W>> for AnyData {
    fn from(words: Vec<W>) -> Self {
        W::into_any(words)
    }
}
