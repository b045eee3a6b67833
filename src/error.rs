//! Error taxonomy for SKIP codec operations
//!
//! One closed enum covers every failure the codec can surface. Each variant
//! carries the context a caller needs to retry with a larger buffer, reject a
//! malformed wire form, or treat the condition as fatal.

use crate::types::FieldType;
use thiserror::Error;

/// Codec errors with detailed context
///
/// Every operation validates its size and index preconditions before touching
/// any output, so a returned error guarantees the schema and all buffers are
/// unchanged. There are no internal retries; errors surface synchronously to
/// the immediate caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipError {
    #[error("field index {index} out of bounds: schema has {count} fields")]
    FieldOutOfBounds { index: usize, count: usize },

    #[error("buffer too small: need {need} bytes, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    #[error("backing storage growth failed")]
    AllocationFailed,

    #[error("invalid endian tag: {0} (0=big, 1=little)")]
    InvalidEndian(u8),

    #[error("value type {value:?} does not match field type {field:?}")]
    TypeMismatch { field: FieldType, value: FieldType },

    #[error("bad magic number: expected {expected:#010x}, got {actual:#010x}")]
    BadMagic { expected: u32, actual: u32 },

    #[error("unsupported format version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("unknown field type code: {0}")]
    InvalidTypeCode(u32),

    #[error("serialized schema body length {len} is not a multiple of {record} bytes")]
    InvalidBodyLength { len: usize, record: usize },

    #[error("declared count or size {0} does not fit the host address space")]
    InvalidCount(u64),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, SkipError>;
