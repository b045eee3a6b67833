//! Byte-order tags and the shared conversion primitives
//!
//! Every multi-byte value the codec touches — field elements, header numerics,
//! body records, envelope length prefixes — goes through the routines in this
//! module, so there is exactly one place where declared byte order meets host
//! byte order. Draft implementations that duplicated the swap logic per call
//! site produced incompatible wire forms; the single-routine rule prevents
//! that divergence.

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkipError};

/// Declared byte order of values stored through a schema
///
/// The wire encoding is a single byte: 0 = big-endian, 1 = little-endian.
/// Both values are stable protocol constants.
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
pub enum Endian {
    Big = 0,
    Little = 1,
}

impl Endian {
    /// Byte order of the running host, determined by a runtime probe.
    ///
    /// The wire format must interoperate across hosts of either order, so the
    /// probe inspects an actual in-memory value rather than trusting a
    /// build-time assumption.
    pub fn host() -> Endian {
        let probe: u32 = 0x0123_4567;
        if probe.to_ne_bytes()[0] == 0x67 {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Decode the wire tag byte
    pub fn from_tag(tag: u8) -> Result<Endian> {
        Endian::try_from(tag).map_err(|_| SkipError::InvalidEndian(tag))
    }

    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endian::Big => BigEndian::read_u16(buf),
            Endian::Little => LittleEndian::read_u16(buf),
        }
    }

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Big => BigEndian::read_u32(buf),
            Endian::Little => LittleEndian::read_u32(buf),
        }
    }

    pub fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            Endian::Big => BigEndian::read_u64(buf),
            Endian::Little => LittleEndian::read_u64(buf),
        }
    }

    pub fn write_u16(self, buf: &mut [u8], v: u16) {
        match self {
            Endian::Big => BigEndian::write_u16(buf, v),
            Endian::Little => LittleEndian::write_u16(buf, v),
        }
    }

    pub fn write_u32(self, buf: &mut [u8], v: u32) {
        match self {
            Endian::Big => BigEndian::write_u32(buf, v),
            Endian::Little => LittleEndian::write_u32(buf, v),
        }
    }

    pub fn write_u64(self, buf: &mut [u8], v: u64) {
        match self {
            Endian::Big => BigEndian::write_u64(buf, v),
            Endian::Little => LittleEndian::write_u64(buf, v),
        }
    }

    /// Copy `src` (host-order elements of `width` bytes) into `dst` in this
    /// byte order. Bulk copy when no swap is needed; otherwise each element is
    /// fully reversed (0x12345678 ↔ 0x78563412).
    ///
    /// `src.len() == dst.len()` and both are multiples of `width`; callers
    /// validate sizes before reaching this point.
    pub(crate) fn pack_elements(self, width: usize, src: &[u8], dst: &mut [u8]) {
        debug_assert_eq!(src.len(), dst.len());
        debug_assert_eq!(src.len() % width.max(1), 0);

        if width == 1 || self == Endian::host() {
            dst.copy_from_slice(src);
            return;
        }

        for (s, d) in src.chunks_exact(width).zip(dst.chunks_exact_mut(width)) {
            match width {
                2 => self.write_u16(d, NativeEndian::read_u16(s)),
                4 => self.write_u32(d, NativeEndian::read_u32(s)),
                8 => self.write_u64(d, NativeEndian::read_u64(s)),
                _ => unreachable!("element widths are 1, 2, 4, or 8"),
            }
        }
    }

    /// Inverse of [`pack_elements`](Self::pack_elements): copy `src` (elements
    /// stored in this byte order) into `dst` in host order.
    pub(crate) fn unpack_elements(self, width: usize, src: &[u8], dst: &mut [u8]) {
        debug_assert_eq!(src.len(), dst.len());
        debug_assert_eq!(src.len() % width.max(1), 0);

        if width == 1 || self == Endian::host() {
            dst.copy_from_slice(src);
            return;
        }

        for (s, d) in src.chunks_exact(width).zip(dst.chunks_exact_mut(width)) {
            match width {
                2 => NativeEndian::write_u16(d, self.read_u16(s)),
                4 => NativeEndian::write_u32(d, self.read_u32(s)),
                8 => NativeEndian::write_u64(d, self.read_u64(s)),
                _ => unreachable!("element widths are 1, 2, 4, or 8"),
            }
        }
    }
}
