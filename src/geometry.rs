//! Bit addressing inside padded words.
//!
//! Every word of width `W` carries `left` padding bits at its most
//! significant end and `right` padding bits at its least significant end.
//! The remaining `span = W - left - right` bits hold stream data, most
//! significant first:
//!
//! ```text
//!  MSB                                LSB
//! +--------+-------------------+--------+
//! |  left  |   span (data)     | right  |
//! +--------+-------------------+--------+
//!           ^ offset 0    offset span-1 ^
//! ```
//!
//! Logical bit `i` lives in word `i / span` at offset `i % span`. Readers and
//! writers share this one implementation, so a writer's output read back with
//! the same padding yields exactly the bits that were written.

use crate::error::{Error, Result};
use crate::word::Word;
use crate::Padding;

/// Precomputed addressing parameters for one padding configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry<W: Word> {
    padding: Padding,
    /// Usable bits per word
    span: usize,
    /// Mask of the first usable bit (offset 0)
    msb: W,
}

impl<W: Word> Geometry<W> {
    /// Validates `padding` against the word width.
    ///
    /// Returns [`Error::InvalidPadding`] when `left + right >= W::BITS`.
    pub fn new(padding: Padding) -> Result<Self> {
        let span = padding.span(W::BITS).ok_or(Error::InvalidPadding {
            left: padding.left,
            right: padding.right,
            width: W::BITS,
        })?;
        Ok(Self {
            padding,
            span: span as usize,
            msb: W::ONE << (W::BITS - padding.left - 1),
        })
    }

    /// Number of usable bits per word.
    #[inline]
    pub fn span(&self) -> usize {
        self.span
    }

    /// The padding this geometry was built from.
    #[inline]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Mask selecting offset 0 within a word.
    #[inline]
    pub fn msb(&self) -> W {
        self.msb
    }

    /// Maps logical bit `i` to its word index and in-word mask.
    #[inline]
    pub fn locate(&self, i: usize) -> (usize, W) {
        let offset = (i % self.span) as u32;
        (i / self.span, self.msb >> offset)
    }

    /// Reads logical bit `i`. Bits beyond the end of `words` read as `false`.
    #[inline]
    pub fn get(&self, words: &[W], i: usize) -> bool {
        let (idx, mask) = self.locate(i);
        match words.get(idx) {
            Some(&word) => word & mask != W::ZERO,
            None => false,
        }
    }

    /// Sets or clears logical bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if the word holding bit `i` is not in `words`.
    #[inline]
    pub fn set(&self, words: &mut [W], i: usize, bit: bool) {
        let (idx, mask) = self.locate(i);
        if bit {
            words[idx] |= mask;
        } else {
            words[idx] &= !mask;
        }
    }

    /// Number of words needed to hold `bits` logical bits.
    #[inline]
    pub fn words_for(&self, bits: usize) -> usize {
        bits.div_ceil(self.span)
    }

    /// Number of logical bits that `words` words can hold.
    #[inline]
    pub fn capacity(&self, words: usize) -> usize {
        words.saturating_mul(self.span)
    }
}
