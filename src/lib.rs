//! Sequential cursors for reading and writing binary file formats held in memory.
//!
//! [`BinaryReader`] walks an immutable buffer, decoding fixed-width numbers in either byte order
//! and text in UTF-8 or UTF-16. [`BinaryWriter`] does the reverse, growing its buffer as values
//! are written. Byte order is chosen per call with [`Endian`]; neither cursor remembers it.
//!
//! Format-specific parsers and serializers are expected to be built on top of these two types.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod byteswap;
mod codec;
mod reader;
mod writer;


pub use byteswap::{swap16, swap32, swap64, swap_bytes, Endian};
pub use codec::{decode, encode, CodecError, Encoding};
pub use reader::{BinaryReader, ReaderError};
pub use writer::{BinaryWriter, BinaryWriterError};
