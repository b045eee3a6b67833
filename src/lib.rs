//! # SKIP Codec - Schema-Driven Binary Buffer Packing
//!
//! ## Purpose
//!
//! A producer describes a flat sequence of typed fields — fixed-width scalars
//! or byte runs — and the codec computes a deterministic byte layout, then
//! packs and unpacks values into one contiguous caller-owned buffer under a
//! configurable byte order. The target is compact binary exchange where
//! textual formats are too slow or too large, with self-description available
//! when a receiver has no prior schema knowledge.
//!
//! ## Key Components
//!
//! - [`FieldType`] — type catalog mapping wire codes to element widths
//! - [`Schema`] — ordered field list, derived offset table, endian tag
//! - Buffer codec — [`Schema::write_field`], [`Schema::read_field`],
//!   [`Schema::write_values`], [`Schema::read_values`], [`Schema::field_slice`]
//! - Header protocol — [`Schema::export_header`], [`Schema::import_header`]
//! - Body serialization — [`Schema::export_body`], [`Schema::import_body`]
//! - Nesting — [`Schema::export_nested`], [`Schema::import_nested_schema`],
//!   [`Schema::import_nested_payload`]
//! - Standalone envelope — [`Schema::export_standalone`],
//!   [`Schema::import_standalone`], [`Schema::import_standalone_data`]
//!
//! ## Quick Start
//!
//! ```rust
//! use skip_codec::{Endian, FieldType, Schema};
//!
//! # fn main() -> skip_codec::Result<()> {
//! // Describe the layout: a u32, a 12-byte string run, two i64s.
//! let mut schema = Schema::with_endian(Endian::Little);
//! schema.push_field(FieldType::UInt32, 1)?;
//! schema.push_field(FieldType::Char, 12)?;
//! schema.push_field(FieldType::Int64, 2)?;
//!
//! // The caller owns the buffer; the schema only computes its size.
//! let mut buf = vec![0u8; schema.total_size()];
//! schema.write_values(&mut buf, 0, &[42u32])?;
//! schema.write_field(&mut buf, 1, b"hello, world")?;
//! schema.write_values(&mut buf, 2, &[-1i64, i64::MAX])?;
//!
//! assert_eq!(schema.read_values::<u32>(&buf, 0)?, [42]);
//! assert_eq!(schema.field_slice(&buf, 1).unwrap(), b"hello, world");
//!
//! // Wrap into a self-describing unit an unrelated process can decode.
//! let mut envelope = vec![0u8; schema.standalone_size()];
//! schema.export_standalone(&buf, &mut envelope)?;
//! let imported = Schema::import_standalone(&envelope)?;
//! assert_eq!(imported.fields(), schema.fields());
//! # Ok(())
//! # }
//! ```
//!
//! ## Byte-Order Model
//!
//! A schema's [`Endian`] tag declares the order of every multi-byte value
//! packed through it. Single-byte element types (`Int8`, `UInt8`, `Char`,
//! `Nest`) are copied verbatim — byte runs have no intrinsic order. The
//! self-describing header records the tag in a single order-independent byte
//! which is read first and governs the interpretation of the header's own
//! numeric fields.
//!
//! ## Ownership and Concurrency
//!
//! Buffers are always caller-owned; no operation allocates, frees, or retains
//! one beyond a single call. Every operation is a bounded-time, in-memory
//! transformation with no I/O. Schema mutation requires exclusive access
//! (`&mut self`); frozen schemas may be shared read-only across threads, and
//! independent schemas share no state at all.

pub mod codec;
pub mod endian;
pub mod envelope;
pub mod error;
pub mod header;
pub mod schema;
pub mod types;

pub use endian::Endian;
pub use error::{Result, SkipError};
pub use header::{SkipHeader, BODY_RECORD_SIZE};
pub use schema::Schema;
pub use types::{FieldDescriptor, FieldType, Scalar};

/// Format magic number: "SKIP" in ASCII
pub const SKIP_MAGIC: u32 = 0x534B_4950;

/// Format version carried in every header
pub const SKIP_VERSION: u32 = 1;
