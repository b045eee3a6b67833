//! # Field Type Catalog
//!
//! Registry of the fixed-width element types a schema field may carry, with
//! their wire codes and byte widths. Wire codes are stable protocol constants:
//! a type code serialized by one peer must decode to the same element width on
//! every other peer, so the discriminants here are never renumbered.
//!
//! Unknown codes are unrepresentable in the type system — decoding goes
//! through `FieldType::try_from(u32)` and failure surfaces as
//! [`SkipError::InvalidTypeCode`](crate::SkipError::InvalidTypeCode) rather
//! than a zero-width sentinel that could silently produce empty fields.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use zerocopy::{AsBytes, FromBytes};

use crate::error::{Result, SkipError};

/// Element types supported by schema fields
///
/// Multi-byte types are stored in the byte order declared by the owning
/// schema's endian tag. `Char` is an opaque 1-byte element for raw byte and
/// string runs; `Nest` marks a byte run holding a nested envelope. Neither is
/// ever byte-swapped.
#[repr(u32)]
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
pub enum FieldType {
    Int8 = 0,
    UInt8 = 1,
    Int16 = 2,
    UInt16 = 3,
    Int32 = 4,
    UInt32 = 5,
    Int64 = 6,
    UInt64 = 7,
    Float32 = 8,
    Float64 = 9,
    /// Opaque byte element for raw/char arrays
    Char = 10,
    /// Byte run holding a nested envelope
    Nest = 11,
}

impl FieldType {
    /// Byte width of a single element of this type
    pub const fn width(self) -> usize {
        match self {
            FieldType::Int8 | FieldType::UInt8 | FieldType::Char | FieldType::Nest => 1,
            FieldType::Int16 | FieldType::UInt16 => 2,
            FieldType::Int32 | FieldType::UInt32 | FieldType::Float32 => 4,
            FieldType::Int64 | FieldType::UInt64 | FieldType::Float64 => 8,
        }
    }

    /// True for 1-byte element types, which carry no intrinsic byte order
    /// and are copied verbatim regardless of the schema's endian tag.
    pub const fn is_byte_run(self) -> bool {
        self.width() == 1
    }

    /// Decode a wire type code
    pub fn from_code(code: u32) -> Result<Self> {
        FieldType::try_from(code).map_err(|_| SkipError::InvalidTypeCode(code))
    }
}

/// One schema position: an element type and a repetition count
///
/// `count` is in elements, not bytes; zero is legal and contributes zero
/// bytes to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field_type: FieldType,
    pub count: usize,
}

impl FieldDescriptor {
    pub fn new(field_type: FieldType, count: usize) -> Self {
        Self { field_type, count }
    }

    /// Total bytes this field occupies in a packed buffer
    pub fn byte_len(&self) -> usize {
        self.field_type.width() * self.count
    }
}

/// Rust scalars that map onto a [`FieldType`]
///
/// Powers the typed [`write_values`](crate::Schema::write_values) /
/// [`read_values`](crate::Schema::read_values) API: the zerocopy bounds give
/// safe host-order byte images of element arrays, and `FIELD_TYPE` lets the
/// codec reject writes against a mismatched descriptor.
pub trait Scalar: AsBytes + FromBytes + Copy {
    const FIELD_TYPE: FieldType;
}

macro_rules! impl_scalar {
    ($($ty:ty => $code:ident),* $(,)?) => {
        $(impl Scalar for $ty {
            const FIELD_TYPE: FieldType = FieldType::$code;
        })*
    };
}

impl_scalar! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}
