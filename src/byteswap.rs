use alloc::vec::Vec;

/// Selects the byte order of a single multi-byte read or write.
///
/// The default is big-endian (network byte order).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Endian {
    /// Most-significant byte first.
    #[default]
    Big,
    /// Least-significant byte first.
    Little,
}

impl Endian {
    /// The byte order of the target platform.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// The byte order of the target platform.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Converts a `little_endian` flag into an `Endian`.
    pub fn from_little_endian(little_endian: bool) -> Self {
        if little_endian {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Returns `true` for `Endian::Little`.
    pub fn is_little(self) -> bool {
        self == Endian::Little
    }

    /// Returns `true` if this is the byte order of the target platform.
    pub fn is_native(self) -> bool {
        self == Self::NATIVE
    }
}

/// Reverses the byte order of a 16-bit word.
#[inline(always)]
pub fn swap16(value: u16) -> u16 {
    value.rotate_left(8)
}

/// Reverses the byte order of a 32-bit word.
#[inline(always)]
pub fn swap32(value: u32) -> u32 {
    ((value & 0xff00_0000) >> 24)
        | ((value & 0x00ff_0000) >> 8)
        | ((value & 0x0000_ff00) << 8)
        | ((value & 0x0000_00ff) << 24)
}

/// Reverses the byte order of a 64-bit word.
#[inline(always)]
pub fn swap64(value: u64) -> u64 {
    let hi = swap32(value as u32) as u64;
    let lo = swap32((value >> 32) as u32) as u64;
    (hi << 32) | lo
}

/// Returns a copy of `bytes` with the order of the bytes reversed end to end.
///
/// The byte at index `i` moves to index `len - 1 - i`. This does not depend on any element
/// width; reversing the 4 bytes of a `u32` is the same as `swap32`.
pub fn swap_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}
