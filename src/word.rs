//! Storage word types.
//!
//! A [`Word`] is one of the unsigned primitive integers (`u8`, `u16`, `u32`,
//! `u64`, `usize`). Readers and writers are generic over it, so every word
//! width gets its own monomorphized code with the width known at compile time.

#[cfg(not(test))]
use alloc::vec::Vec;

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Shl, Shr};

use crate::any::AnyData;

/// An unsigned integer used as the storage unit of a bit stream.
///
/// This trait is sealed: it is implemented for `u8`, `u16`, `u32`, `u64` and
/// `usize` and cannot be implemented outside this crate.
pub trait Word:
    private::Sealed
    + Copy
    + Default
    + Eq
    + fmt::Debug
    + fmt::Binary
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitAndAssign
    + BitOrAssign
{
    /// Width of the word in bits.
    const BITS: u32;
    /// The all-zero word.
    const ZERO: Self;
    /// The word with only the least significant bit set.
    const ONE: Self;

    /// Wraps an owned word vector into the width-erased [`AnyData`].
    fn into_any(words: Vec<Self>) -> AnyData;

    /// Borrows the words back out of [`AnyData`] if the width matches.
    fn from_any_ref(data: &AnyData) -> Option<&[Self]>;

    /// Takes the words back out of [`AnyData`] if the width matches.
    ///
    /// On mismatch the original value is handed back unchanged.
    fn from_any(data: AnyData) -> Result<Vec<Self>, AnyData>;
}

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for usize {}
}

macro_rules! impl_word {
    ($t:ty, $variant:ident) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn into_any(words: Vec<Self>) -> AnyData {
                AnyData::$variant(words)
            }

            #[inline]
            fn from_any_ref(data: &AnyData) -> Option<&[Self]> {
                match data {
                    AnyData::$variant(words) => Some(words.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn from_any(data: AnyData) -> Result<Vec<Self>, AnyData> {
                match data {
                    AnyData::$variant(words) => Ok(words),
                    other => Err(other),
                }
            }
        }
    };
}

impl_word!(u8, U8);
impl_word!(u16, U16);
impl_word!(u32, U32);
impl_word!(u64, U64);
impl_word!(usize, Usize);
