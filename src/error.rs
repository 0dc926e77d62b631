//! Errors reported by bit readers and writers.
//!
//! Only stream-boundary conditions are reported through [`Error`]. Caller
//! contract violations (asking a block read or write for more bits than the
//! destination or source integer holds) panic instead.

use core::fmt;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while addressing a bit stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A cursor or random-access read hit the logical end of the stream.
    ///
    /// Nothing was consumed and the cursor did not move.
    EndOfStream {
        /// Bit position that was requested
        pos: usize,
        /// Logical length of the stream in bits
        len: usize,
    },

    /// A seek or random-access operation was given a negative position.
    InvalidPosition(isize),

    /// The padding leaves no usable bits in a word (`left + right >= width`).
    InvalidPadding {
        /// Padding bits at the most significant end
        left: u32,
        /// Padding bits at the least significant end
        right: u32,
        /// Word width in bits
        width: u32,
    },
}

impl Error {
    /// Returns true for [`Error::EndOfStream`].
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EndOfStream { pos, len } => {
                write!(f, "end of stream: bit {} requested, stream has {} bits", pos, len)
            }
            Error::InvalidPosition(pos) => {
                write!(f, "invalid bit position {}: positions must be non-negative", pos)
            }
            Error::InvalidPadding { left, right, width } => {
                write!(
                    f,
                    "padding sum must be less than word bit size: {} + {} >= {}",
                    left, right, width
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
