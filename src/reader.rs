use alloc::string::String;
use core::ops::{Bound, Range, RangeBounds};

use bytes::Bytes;

use crate::byteswap::Endian;
use crate::codec::{decode, CodecError, Encoding};

pub type Result<T> = core::result::Result<T, ReaderError>;

/// Reads values sequentially from an in-memory buffer.
///
/// The reader owns a cheaply cloneable handle to the buffer and a read position. Each `read_*`
/// call checks that the whole value lies inside the buffer before consuming anything; if it does
/// not, the call fails with [`ReaderError::OutOfBounds`] and the position is left where it was.
/// A failed read never advances the position.
///
/// Multi-byte values take an [`Endian`] argument on every call. Nothing about byte order is
/// remembered between calls.
///
/// The position can be moved freely with [`set_position`](Self::set_position) and
/// [`move_position`](Self::move_position). Moving past the end is allowed; the next read will
/// report it.
#[derive(Clone, Debug)]
pub struct BinaryReader {
    data: Bytes,
    position: usize,
    saved_position: Option<usize>,
}

impl BinaryReader {
    /// Constructor
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
            saved_position: None,
        }
    }

    /// The underlying buffer. Cloning it does not copy the bytes.
    pub fn buffer(&self) -> &Bytes {
        &self.data
    }

    /// Total length of the underlying buffer, independent of the position.
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    /// The current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes between the position and the end of the buffer. Zero if the position is
    /// at or past the end.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Returns a new reader over the same buffer, positioned at `position`.
    ///
    /// The buffer is shared, not copied. The two readers have independent positions, and the
    /// new reader has no saved position.
    pub fn at(&self, position: usize) -> Self {
        Self {
            data: self.data.clone(),
            position,
            saved_position: None,
        }
    }

    /// Returns a new reader over a copy of `range` of the buffer, positioned at 0.
    ///
    /// Bounds past the end of the buffer are clamped to the end. A range whose start lies after
    /// its end produces an empty reader.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        let len = self.data.len();
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);
        let begin = match range.start_bound() {
            Bound::Included(&b) => b,
            Bound::Excluded(&b) => b.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(end);

        Self::new(Bytes::copy_from_slice(&self.data[begin..end]))
    }

    /// Sets the read position. This is not checked against the length of the buffer.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Moves the read position by `delta` bytes, saturating at zero.
    pub fn move_position(&mut self, delta: isize) {
        self.position = self.position.saturating_add_signed(delta);
    }

    /// Remembers the current position so that [`restore`](Self::restore) can return to it.
    ///
    /// There is a single slot. Saving while a position is already saved replaces the old one
    /// and logs a warning.
    pub fn save(&mut self) {
        if let Some(previous) = self.saved_position {
            tracing::warn!(
                previous,
                position = self.position,
                "there already is a saved position; it is being replaced"
            );
        }
        self.saved_position = Some(self.position);
    }

    /// Returns to the position remembered by [`save`](Self::save) and clears the slot.
    pub fn restore(&mut self) -> Result<()> {
        let position = self.saved_position.take().ok_or(ReaderError::NoSavedPosition)?;
        self.position = position;
        Ok(())
    }

    /// Checks that `len` bytes are available at the current position and returns their range
    /// without consuming them.
    #[inline(always)]
    fn claim(&self, len: usize) -> Result<Range<usize>> {
        match self.position.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(self.position..end),
            _ => Err(ReaderError::OutOfBounds {
                requested: len,
                position: self.position,
                length: self.data.len(),
            }),
        }
    }

    /// Returns the next `len` bytes and advances the position past them.
    ///
    /// The returned `Bytes` shares storage with the reader's buffer, which is never mutated, so
    /// it behaves as an independent copy.
    pub fn next_bytes(&mut self, len: usize) -> Result<Bytes> {
        let range = self.claim(len)?;
        self.position = range.end;
        Ok(self.data.slice(range))
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let range = self.claim(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[range.clone()]);
        self.position = range.end;
        Ok(bytes)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.read_cbytes()?))
    }

    /// Reads a `u16` in the given byte order.
    pub fn read_u16(&mut self, endian: Endian) -> Result<u16> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => u16::from_be_bytes(b),
            Endian::Little => u16::from_le_bytes(b),
        })
    }

    /// Reads an `i16` in the given byte order.
    pub fn read_i16(&mut self, endian: Endian) -> Result<i16> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => i16::from_be_bytes(b),
            Endian::Little => i16::from_le_bytes(b),
        })
    }

    /// Reads a `u32` in the given byte order.
    pub fn read_u32(&mut self, endian: Endian) -> Result<u32> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => u32::from_be_bytes(b),
            Endian::Little => u32::from_le_bytes(b),
        })
    }

    /// Reads an `i32` in the given byte order.
    pub fn read_i32(&mut self, endian: Endian) -> Result<i32> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => i32::from_be_bytes(b),
            Endian::Little => i32::from_le_bytes(b),
        })
    }

    /// Reads a `u64` in the given byte order.
    pub fn read_u64(&mut self, endian: Endian) -> Result<u64> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => u64::from_be_bytes(b),
            Endian::Little => u64::from_le_bytes(b),
        })
    }

    /// Reads an `i64` in the given byte order.
    pub fn read_i64(&mut self, endian: Endian) -> Result<i64> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => i64::from_be_bytes(b),
            Endian::Little => i64::from_le_bytes(b),
        })
    }

    /// Reads a 4-byte IEEE-754 `f32` in the given byte order.
    pub fn read_f32(&mut self, endian: Endian) -> Result<f32> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => f32::from_be_bytes(b),
            Endian::Little => f32::from_le_bytes(b),
        })
    }

    /// Reads an 8-byte IEEE-754 `f64` in the given byte order.
    pub fn read_f64(&mut self, endian: Endian) -> Result<f64> {
        let b = self.read_cbytes()?;
        Ok(match endian {
            Endian::Big => f64::from_be_bytes(b),
            Endian::Little => f64::from_le_bytes(b),
        })
    }

    /// Reads an unsigned integer that is `byte_length` bytes wide: 1, 2, 4 or 8.
    pub fn read_uint(&mut self, byte_length: usize, endian: Endian) -> Result<u64> {
        match byte_length {
            1 => self.read_u8().map(u64::from),
            2 => self.read_u16(endian).map(u64::from),
            4 => self.read_u32(endian).map(u64::from),
            8 => self.read_u64(endian),
            _ => Err(ReaderError::UnsupportedWidth(byte_length)),
        }
    }

    /// Reads a float that is `byte_length` bytes wide: 4 or 8. Single precision values are
    /// widened to `f64`.
    pub fn read_float(&mut self, byte_length: usize, endian: Endian) -> Result<f64> {
        match byte_length {
            4 => self.read_f32(endian).map(f64::from),
            8 => self.read_f64(endian),
            _ => Err(ReaderError::UnsupportedWidth(byte_length)),
        }
    }

    /// Reads exactly `byte_length` bytes and decodes them as text.
    ///
    /// If the bytes cannot be decoded, the position is not advanced.
    pub fn read_string(&mut self, byte_length: usize, encoding: Encoding) -> Result<String> {
        let range = self.claim(byte_length)?;
        let text = decode(&self.data[range.clone()], encoding)?;
        self.position = range.end;
        Ok(text)
    }

    /// Reads a string preceded by its length in bytes.
    ///
    /// The length is read as an unsigned integer `prefix_width` bytes wide (see
    /// [`read_uint`](Self::read_uint)), followed by that many bytes of text. If any part fails,
    /// the position is restored to where this call began.
    pub fn read_prefixed_string(
        &mut self,
        prefix_width: usize,
        endian: Endian,
        encoding: Encoding,
    ) -> Result<String> {
        let start = self.position;
        let result = self.read_uint(prefix_width, endian).and_then(|len| {
            let len = usize::try_from(len).map_err(|_| ReaderError::LengthOverflow(len))?;
            self.read_string(len, encoding)
        });
        if result.is_err() {
            self.position = start;
        }
        result
    }

    /// Reads `byte_length` bytes as a byte string, without validating them as UTF-8.
    #[cfg(feature = "bstr")]
    pub fn read_bstr(&mut self, byte_length: usize) -> Result<bstr::BString> {
        let bytes = self.next_bytes(byte_length)?;
        Ok(bstr::BString::from(bytes.as_ref()))
    }
}

/// Error type for `BinaryReader`
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ReaderError {
    /// A read needed more bytes than remain in the buffer. Nothing was consumed.
    #[error(
        "reader is out of bounds: tried to read {requested} bytes at offset {position}, \
         but the buffer is only {length} bytes long"
    )]
    OutOfBounds {
        /// Number of bytes the read needed.
        requested: usize,
        /// Position of the reader when the read was attempted.
        position: usize,
        /// Length of the buffer.
        length: usize,
    },

    /// `read_uint` or `read_float` was asked for a width it does not support.
    #[error("unsupported byte length {0}")]
    UnsupportedWidth(usize),

    /// `restore` was called without a preceding `save`.
    #[error("position must be saved before it can be restored")]
    NoSavedPosition,

    /// A length prefix does not fit in `usize` on this platform.
    #[error("length prefix {0} is too large for this platform")]
    LengthOverflow(u64),

    /// The bytes of a string could not be decoded.
    #[error(transparent)]
    Text(#[from] CodecError),
}
