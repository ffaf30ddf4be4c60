use alloc::vec::Vec;

use crate::byteswap::Endian;
use crate::codec::{encode, Encoding};

pub type Result<T> = core::result::Result<T, BinaryWriterError>;

/// Writes values sequentially into a buffer that grows as needed.
///
/// Each write stores its bytes at the write pointer and advances the pointer past them. The
/// pointer can be moved anywhere with [`set_pointer`](Self::set_pointer) or
/// [`move_pointer`](Self::move_pointer); writing beyond the end of the buffer extends it, and
/// any gap left behind is filled with zeros.
///
/// After a write of `n` bytes at pointer `p`, the buffer length is exactly
/// `max(previous_length, p + n)`. Spare capacity is managed by the `Vec` and is not visible.
#[derive(Clone, Debug, Default)]
pub struct BinaryWriter {
    out: Vec<u8>,
    pointer: usize,
}

impl BinaryWriter {
    /// Creates a new, empty `BinaryWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty `BinaryWriter` that can hold `len` bytes before reallocating.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            out: Vec::with_capacity(len),
            pointer: 0,
        }
    }

    /// The buffer written so far, including any zero-filled gaps.
    pub fn buffer(&self) -> &[u8] {
        &self.out
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.out
    }

    /// The current write pointer.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Sets the write pointer. It may point past the end of the buffer.
    pub fn set_pointer(&mut self, pointer: usize) {
        self.pointer = pointer;
    }

    /// Moves the write pointer by `delta` bytes, saturating at zero.
    pub fn move_pointer(&mut self, delta: isize) {
        self.pointer = self.pointer.saturating_add_signed(delta);
    }

    /// Writes `bytes` at the write pointer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self
            .pointer
            .checked_add(bytes.len())
            .expect("write pointer overflows usize");

        if self.out.len() < end {
            tracing::trace!(from = self.out.len(), to = end, "growing writer buffer");
            self.out.resize(end, 0);
        }

        self.out[self.pointer..end].copy_from_slice(bytes);
        self.pointer = end;
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) {
        self.write_bytes(&value)
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) {
        self.write_bytes(&[value as u8])
    }

    /// Writes a single `u16` value
    pub fn write_u16(&mut self, value: u16, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes a single `u32` value
    pub fn write_u32(&mut self, value: u32, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes a single `u64` value
    pub fn write_u64(&mut self, value: u64, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes a single `i64` value
    pub fn write_i64(&mut self, value: i64, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes an `f32` value using its 4-byte IEEE-754 representation.
    pub fn write_f32(&mut self, value: f32, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes an `f64` value using its 8-byte IEEE-754 representation.
    pub fn write_f64(&mut self, value: f64, endian: Endian) {
        self.write_cbytes(match endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        })
    }

    /// Writes `value` as an unsigned integer `byte_length` bytes wide: 1, 2, 4 or 8.
    ///
    /// Nothing is written if the width is not supported or `value` does not fit in it.
    pub fn write_uint(&mut self, byte_length: usize, value: u64, endian: Endian) -> Result<()> {
        let out_of_range = |_| BinaryWriterError::ValueOutOfRange { value, byte_length };
        match byte_length {
            1 => self.write_u8(u8::try_from(value).map_err(out_of_range)?),
            2 => self.write_u16(u16::try_from(value).map_err(out_of_range)?, endian),
            4 => self.write_u32(u32::try_from(value).map_err(out_of_range)?, endian),
            8 => self.write_u64(value, endian),
            _ => return Err(BinaryWriterError::UnsupportedWidth(byte_length)),
        }
        Ok(())
    }

    /// Encodes `value` and writes the bytes. No length or terminator is written.
    pub fn write_string(&mut self, value: &str, encoding: Encoding) {
        self.write_bytes(&encode(value, encoding))
    }

    /// Encodes `value` and writes it preceded by its length in bytes, as an unsigned integer
    /// `prefix_width` bytes wide.
    ///
    /// Nothing is written if the length cannot be represented in `prefix_width` bytes.
    pub fn write_prefixed_string(
        &mut self,
        value: &str,
        prefix_width: usize,
        endian: Endian,
        encoding: Encoding,
    ) -> Result<()> {
        let bytes = encode(value, encoding);
        self.write_uint(prefix_width, bytes.len() as u64, endian)?;
        self.write_bytes(&bytes);
        Ok(())
    }
}

/// Error type for the width-dispatched `write_*` functions of `BinaryWriter`.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum BinaryWriterError {
    /// `write_uint` was asked for a width it does not support.
    #[error("unsupported byte length {0}")]
    UnsupportedWidth(usize),

    /// The value does not fit in the requested width.
    #[error("value {value} does not fit in {byte_length} bytes")]
    ValueOutOfRange {
        /// The value that was to be written.
        value: u64,
        /// The requested width.
        byte_length: usize,
    },
}
