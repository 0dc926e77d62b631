//! # padded-bitstream
//!
//! Bit-addressable readers and writers over sequences of fixed-width
//! unsigned integer words.
//!
//! Each word may reserve padding bits at its most significant end (`left`)
//! and at its least significant end (`right`). Those bits are skipped when
//! addressing, so a stream of 7-bit fields can be packed into bytes whose top
//! bit stays clear, or a stream can be read straight out of storage words that
//! carry tag bits.
//!
//! ## Quick Start
//!
//! ```
//! use padded_bitstream::{BitReader, BitWriter};
//!
//! // Pack two 4-bit fields and one 3-bit field, MSB first
//! let writer = BitWriter::<u8>::new(0, 0);
//! writer.write_u8(4, 4, 0b1010);
//! writer.write_u8(4, 4, 0b0110);
//! writer.write_u8(5, 3, 0b111);
//! assert_eq!(writer.len(), 11);
//!
//! let words = writer.data();
//! assert_eq!(words, vec![0b1010_0110, 0b1110_0000]);
//!
//! // Read them back as 4-bit blocks
//! let mut reader = BitReader::new(&words, 0, 0);
//! reader.limit_bits(writer.len());
//! assert_eq!(reader.read_u8(4, 0), 0b1010);
//! assert_eq!(reader.read_u8(4, 1), 0b0110);
//! // Only 3 bits remain in block 2; the missing bit reads as zero
//! assert_eq!(reader.read_u8(4, 2), 0b1110);
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Enables [`BitWriter`], which needs `std::sync::Mutex`,
//!   and the `std::error::Error` impl for [`Error`]
//! - `serde` - Enable serialization/deserialization of [`Padding`] and
//!   [`AnyData`]

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod any;
mod error;
pub mod geometry;
mod reader;
mod word;
#[cfg(feature = "std")]
mod writer;

pub use any::AnyData;
pub use error::{Error, Result};
pub use geometry::Geometry;
pub use reader::{BitIter, BitReader};
pub use word::Word;
#[cfg(feature = "std")]
pub use writer::BitWriter;

/// Padding bits excluded from addressing in every word.
///
/// `left` bits are skipped at the most significant end and `right` bits at
/// the least significant end. A padding is only valid for a word width `W`
/// when `left + right < W`; readers and writers check this on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Padding {
    /// Padding bits at the most significant end (default: 0)
    pub left: u32,
    /// Padding bits at the least significant end (default: 0)
    pub right: u32,
}

impl Padding {
    /// No padding: every bit of every word is addressable.
    pub const NONE: Padding = Padding { left: 0, right: 0 };

    /// Create a padding of `left` high bits and `right` low bits.
    #[inline]
    pub const fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    /// Usable bits per word of width `word_bits`, or `None` if the padding
    /// leaves nothing.
    #[inline]
    pub const fn span(&self, word_bits: u32) -> Option<u32> {
        match self.left.checked_add(self.right) {
            Some(total) if total < word_bits => Some(word_bits - total),
            _ => None,
        }
    }
}
