//! Growable, thread-safe bit stream over owned words.
//!
//! [`BitWriter`] keeps its words, logical length and cursor behind a single
//! mutex. Each public method takes the lock exactly once, so concurrent
//! callers are serialized and a block write is never interleaved with another
//! caller's bits.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::any::AnyData;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::word::Word;
use crate::Padding;

/// Lock-protected writer state.
#[derive(Debug)]
struct State<W: Word> {
    words: Vec<W>,
    /// One past the highest bit written
    bits: usize,
    /// Cursor for `write_bit` / `read_bit`
    pos: usize,
}

impl<W: Word> State<W> {
    /// Append one bit at the logical end.
    #[inline]
    fn push(&mut self, geometry: &Geometry<W>, bit: bool) {
        let (idx, _) = geometry.locate(self.bits);
        if idx >= self.words.len() {
            self.words.push(W::ZERO);
            log::trace!("grew to {} words", self.words.len());
        }
        geometry.set(&mut self.words, self.bits, bit);
        self.bits += 1;
    }

    /// Write one bit at `pos`, growing the buffer up to it if needed.
    fn put(&mut self, geometry: &Geometry<W>, pos: usize, bit: bool) {
        let needed = pos / geometry.span() + 1;
        if needed > self.words.len() {
            log::trace!("grew from {} to {} words", self.words.len(), needed);
            self.words.resize(needed, W::ZERO);
        }
        geometry.set(&mut self.words, pos, bit);
        self.bits = self.bits.max(pos + 1);
    }

    fn get(&self, geometry: &Geometry<W>, pos: usize) -> Result<bool> {
        if pos >= self.bits {
            return Err(Error::EndOfStream {
                pos,
                len: self.bits,
            });
        }
        Ok(geometry.get(&self.words, pos))
    }
}

/// A bit stream builder that owns and grows its words.
///
/// All methods take `&self`; wrap the writer in an `Arc` to share it between
/// threads.
///
/// # Example
///
/// ```
/// use padded_bitstream::BitWriter;
///
/// // Keep the top bit of every byte clear
/// let writer = BitWriter::<u8>::new(1, 0);
/// writer.write_u8(0, 8, 0xFF);
///
/// assert_eq!(writer.len(), 8);
/// assert_eq!(writer.data(), vec![0b0111_1111, 0b0100_0000]);
/// ```
#[derive(Debug)]
pub struct BitWriter<W: Word> {
    geometry: Geometry<W>,
    state: Mutex<State<W>>,
}

impl<W: Word> BitWriter<W> {
    /// Create an empty writer that skips `left_pad` high bits and `right_pad`
    /// low bits of every word.
    ///
    /// # Panics
    ///
    /// Panics if `left_pad + right_pad >= W::BITS`.
    pub fn new(left_pad: u32, right_pad: u32) -> Self {
        match Self::try_new(left_pad, right_pad) {
            Ok(writer) => writer,
            Err(err) => panic!("{}", err),
        }
    }

    /// Like [`BitWriter::new`], but returns [`Error::InvalidPadding`] instead
    /// of panicking.
    pub fn try_new(left_pad: u32, right_pad: u32) -> Result<Self> {
        Self::with_padding(Padding::new(left_pad, right_pad))
    }

    /// Create an empty writer from a [`Padding`] value.
    pub fn with_padding(padding: Padding) -> Result<Self> {
        Self::with_capacity(padding, 0)
    }

    /// Create an empty writer with room for `bits` bits before it has to grow.
    pub fn with_capacity(padding: Padding, bits: usize) -> Result<Self> {
        let geometry = Geometry::new(padding)?;
        Ok(Self {
            state: Mutex::new(State {
                words: Vec::with_capacity(geometry.words_for(bits)),
                bits: 0,
                pos: 0,
            }),
            geometry,
        })
    }

    /// Every mutation leaves the state consistent before it can panic, so a
    /// poisoned lock is safe to reuse.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, State<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The padding this writer skips in every word.
    #[inline]
    pub fn padding(&self) -> Padding {
        self.geometry.padding()
    }

    /// Usable bits per word.
    #[inline]
    pub fn span(&self) -> usize {
        self.geometry.span()
    }

    /// Append the low `bits` bits of `value` after skipping `src_left_pad`
    /// high bits of the 8-bit source, MSB first.
    ///
    /// # Panics
    ///
    /// Panics if `src_left_pad + bits > 8`.
    pub fn write_u8(&self, src_left_pad: u32, bits: u32, value: u8) {
        self.write_block(u8::BITS, src_left_pad, bits, u64::from(value));
    }

    /// Append `bits` bits of a 16-bit source after skipping `src_left_pad`
    /// high bits.
    ///
    /// # Panics
    ///
    /// Panics if `src_left_pad + bits > 16`.
    pub fn write_u16(&self, src_left_pad: u32, bits: u32, value: u16) {
        self.write_block(u16::BITS, src_left_pad, bits, u64::from(value));
    }

    /// Append `bits` bits of a 32-bit source after skipping `src_left_pad`
    /// high bits.
    ///
    /// # Panics
    ///
    /// Panics if `src_left_pad + bits > 32`.
    pub fn write_u32(&self, src_left_pad: u32, bits: u32, value: u32) {
        self.write_block(u32::BITS, src_left_pad, bits, u64::from(value));
    }

    /// Append `bits` bits of a 64-bit source after skipping `src_left_pad`
    /// high bits.
    ///
    /// # Panics
    ///
    /// Panics if `src_left_pad + bits > 64`.
    pub fn write_u64(&self, src_left_pad: u32, bits: u32, value: u64) {
        self.write_block(u64::BITS, src_left_pad, bits, value);
    }

    fn write_block(&self, width: u32, src_left_pad: u32, bits: u32, value: u64) {
        // Checked before locking so the panic never happens under the guard
        assert!(
            src_left_pad.saturating_add(bits) <= width,
            "cannot write {} bits at source padding {} from a {}-bit value",
            bits,
            src_left_pad,
            width
        );
        let mut state = self.lock();
        for j in 0..bits {
            let shift = width - 1 - src_left_pad - j;
            state.push(&self.geometry, (value >> shift) & 1 == 1);
        }
    }

    /// Append one bit at the logical end. The cursor is not used.
    pub fn write_bool(&self, bit: bool) {
        self.lock().push(&self.geometry, bit);
    }

    /// Write one bit at the cursor and advance it.
    ///
    /// Writing at or past the logical end extends the stream; any gap
    /// between the old end and the cursor reads as zero.
    pub fn write_bit(&self, bit: bool) {
        let mut state = self.lock();
        let pos = state.pos;
        state.put(&self.geometry, pos, bit);
        state.pos = pos + 1;
    }

    /// Write one bit at `pos` without moving the cursor.
    ///
    /// Overwrites a previously written bit or extends the stream.
    pub fn write_bit_at(&self, pos: isize, bit: bool) -> Result<()> {
        let pos = usize::try_from(pos).map_err(|_| Error::InvalidPosition(pos))?;
        self.lock().put(&self.geometry, pos, bit);
        Ok(())
    }

    /// Read the bit at the cursor and advance it.
    ///
    /// Returns [`Error::EndOfStream`] without moving the cursor if it is at
    /// or past the logical end.
    pub fn read_bit(&self) -> Result<bool> {
        let mut state = self.lock();
        let bit = state.get(&self.geometry, state.pos)?;
        state.pos += 1;
        Ok(bit)
    }

    /// Read the bit at `pos` without moving the cursor.
    pub fn read_bit_at(&self, pos: isize) -> Result<bool> {
        let pos = usize::try_from(pos).map_err(|_| Error::InvalidPosition(pos))?;
        self.lock().get(&self.geometry, pos)
    }

    /// Move the cursor to `pos`. Positions past the logical end are accepted.
    pub fn seek(&self, pos: isize) -> Result<()> {
        let pos = usize::try_from(pos).map_err(|_| Error::InvalidPosition(pos))?;
        self.lock().pos = pos;
        Ok(())
    }

    /// Current cursor position in bits.
    pub fn position(&self) -> usize {
        self.lock().pos
    }

    /// Logical length in bits.
    pub fn len(&self) -> usize {
        self.lock().bits
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the words written so far.
    pub fn data(&self) -> Vec<W> {
        self.lock().words.clone()
    }

    /// Copy of the words written so far, with the word width erased.
    pub fn any_data(&self) -> AnyData {
        W::into_any(self.data())
    }

    /// Consume the writer and return its words.
    pub fn into_data(self) -> Vec<W> {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .words
    }

    /// Consume the writer and return its words with the width erased.
    pub fn into_any_data(self) -> AnyData {
        W::into_any(self.into_data())
    }
}
