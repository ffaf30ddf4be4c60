//! Conversion between text and its binary representation.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use zerocopy::byteorder::{NativeEndian, U16};
use zerocopy::{FromBytes, IntoBytes};

use crate::byteswap::{swap16, Endian};

pub type Result<T> = core::result::Result<T, CodecError>;

/// A text encoding understood by [`encode`] and [`decode`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Encoding {
    /// UTF-8. This is the default.
    #[default]
    Utf8,
    /// UTF-16 code units stored least-significant byte first.
    Utf16Le,
    /// UTF-16 code units stored most-significant byte first.
    Utf16Be,
}

impl Encoding {
    /// The short name of the encoding, e.g. `utf16le`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Utf16Be => "utf16be",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    /// Parses an encoding name. Matching ignores ASCII case and accepts both `utf16le` and
    /// `utf-16le` spellings.
    fn from_str(s: &str) -> Result<Self> {
        const NAMES: &[(&str, Encoding)] = &[
            ("utf8", Encoding::Utf8),
            ("utf-8", Encoding::Utf8),
            ("utf16le", Encoding::Utf16Le),
            ("utf-16le", Encoding::Utf16Le),
            ("utf16be", Encoding::Utf16Be),
            ("utf-16be", Encoding::Utf16Be),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, encoding)| encoding)
            .ok_or_else(|| CodecError::UnsupportedEncoding(s.to_string()))
    }
}

/// Encodes `text` using `encoding`.
///
/// For UTF-16, each code unit of `text` is stored as-is; characters outside the Basic
/// Multilingual Plane become the two code units of their surrogate pair. No byte-order mark is
/// written.
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => text.as_bytes().to_vec(),
        Encoding::Utf16Le => encode_utf16(text, Endian::Little),
        Encoding::Utf16Be => encode_utf16(text, Endian::Big),
    }
}

/// Decodes `bytes` using `encoding`.
///
/// Malformed UTF-8 sequences and unpaired UTF-16 surrogates are replaced with U+FFFD. UTF-16
/// input must have an even length.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Encoding::Utf16Le => decode_utf16(bytes, Endian::Little),
        Encoding::Utf16Be => decode_utf16(bytes, Endian::Big),
    }
}

fn encode_utf16(text: &str, endian: Endian) -> Vec<u8> {
    let units: Vec<u16> = if endian.is_native() {
        text.encode_utf16().collect()
    } else {
        text.encode_utf16().map(swap16).collect()
    };
    units.as_slice().as_bytes().to_vec()
}

fn decode_utf16(bytes: &[u8], endian: Endian) -> Result<String> {
    let Ok(units) = <[U16<NativeEndian>]>::ref_from_bytes(bytes) else {
        return Err(CodecError::OddUtf16Length(bytes.len()));
    };

    let units: Vec<u16> = if endian.is_native() {
        units.iter().map(|u| u.get()).collect()
    } else {
        units.iter().map(|u| swap16(u.get())).collect()
    };
    Ok(String::from_utf16_lossy(&units))
}

/// Error type for [`encode`], [`decode`] and parsing an [`Encoding`] name.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum CodecError {
    /// The named encoding is not one of `utf8`, `utf16le` or `utf16be`.
    #[error("unsupported string encoding \"{0}\"")]
    UnsupportedEncoding(String),

    /// UTF-16 input was not a whole number of 16-bit code units.
    #[error("UTF-16 data must have an even length, but it is {0} bytes long")]
    OddUtf16Length(usize),
}
