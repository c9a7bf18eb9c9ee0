//! Unaligned load/store and bit-scan primitives
//!
//! Portable helpers for reading and writing fixed-width integers at arbitrary
//! byte offsets, in either byte order, plus the bit-scan operations the
//! deflate tables are built with. The memory reader uses the big-endian
//! loads since the VR4300 runs big-endian.
//!
//! All loads and stores take a byte slice starting at the value's first byte.
//!
//! # Panics
//!
//! The `get_*`/`put_*` functions panic if the slice is shorter than the
//! value being accessed, the same way slice indexing does.

/// Number of bits in a byte
pub const BITS_PER_BYTE: u32 = 8;

/// Number of bits in one hex digit
pub const BITS_PER_HEX: u32 = 4;

/// Swap the bytes of a 16-bit integer
#[inline]
pub const fn bswap16(v: u16) -> u16 {
    v.swap_bytes()
}

/// Swap the bytes of a 32-bit integer
#[inline]
pub const fn bswap32(v: u32) -> u32 {
    v.swap_bytes()
}

/// Swap the bytes of a 64-bit integer
#[inline]
pub const fn bswap64(v: u64) -> u64 {
    v.swap_bytes()
}

fn load<const N: usize>(p: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&p[..N]);
    bytes
}

pub fn get_unaligned_le16(p: &[u8]) -> u16 {
    u16::from_le_bytes(load(p))
}

pub fn get_unaligned_be16(p: &[u8]) -> u16 {
    u16::from_be_bytes(load(p))
}

pub fn get_unaligned_le32(p: &[u8]) -> u32 {
    u32::from_le_bytes(load(p))
}

pub fn get_unaligned_be32(p: &[u8]) -> u32 {
    u32::from_be_bytes(load(p))
}

pub fn get_unaligned_le64(p: &[u8]) -> u64 {
    u64::from_le_bytes(load(p))
}

pub fn get_unaligned_be64(p: &[u8]) -> u64 {
    u64::from_be_bytes(load(p))
}

pub fn put_unaligned_le16(v: u16, p: &mut [u8]) {
    p[..2].copy_from_slice(&v.to_le_bytes());
}

pub fn put_unaligned_be16(v: u16, p: &mut [u8]) {
    p[..2].copy_from_slice(&v.to_be_bytes());
}

pub fn put_unaligned_le32(v: u32, p: &mut [u8]) {
    p[..4].copy_from_slice(&v.to_le_bytes());
}

pub fn put_unaligned_be32(v: u32, p: &mut [u8]) {
    p[..4].copy_from_slice(&v.to_be_bytes());
}

pub fn put_unaligned_le64(v: u64, p: &mut [u8]) {
    p[..8].copy_from_slice(&v.to_le_bytes());
}

pub fn put_unaligned_be64(v: u64, p: &mut [u8]) {
    p[..8].copy_from_slice(&v.to_be_bytes());
}

/// Bit-scan-reverse: 0-based index of the most significant 1 bit.
///
/// Returns `None` for zero, which has no set bit.
#[inline]
pub const fn bsr32(v: u32) -> Option<u32> {
    if v == 0 {
        None
    } else {
        Some(31 - v.leading_zeros())
    }
}

#[inline]
pub const fn bsr64(v: u64) -> Option<u32> {
    if v == 0 {
        None
    } else {
        Some(63 - v.leading_zeros())
    }
}

/// Bit-scan-forward: 0-based index of the least significant 1 bit.
#[inline]
pub const fn bsf32(v: u32) -> Option<u32> {
    if v == 0 {
        None
    } else {
        Some(v.trailing_zeros())
    }
}

#[inline]
pub const fn bsf64(v: u64) -> Option<u32> {
    if v == 0 {
        None
    } else {
        Some(v.trailing_zeros())
    }
}

/// Round `n` up to a multiple of `a`, which must be a power of two
#[inline]
pub const fn align(n: u32, a: u32) -> u32 {
    n.wrapping_add(a - 1) & !(a - 1)
}

/// Round `n` down to a multiple of `a`, which must be a power of two
#[inline]
pub const fn align_floor(n: u32, a: u32) -> u32 {
    n & !(a - 1)
}

/// Mask of the low `n` bits
#[inline]
pub const fn bitmask(n: u32) -> u32 {
    if n >= 32 {
        u32::MAX
    } else {
        (1 << n) - 1
    }
}
