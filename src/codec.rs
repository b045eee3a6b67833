//! # Buffer Codec - endian-aware field access
//!
//! Packs and unpacks field values against caller-owned buffers using a
//! [`Schema`] for offsets and widths. Every entry point validates the field
//! index and the full byte range before touching the buffer, so a failing
//! call writes nothing. Side effects of a successful write are confined to
//! that field's `[offset, offset + byte_len)` range.
//!
//! Two surfaces are provided:
//! - raw: [`Schema::write_field`] / [`Schema::read_field`] move host-order
//!   element bytes, converting per element when the schema's declared order
//!   differs from the host;
//! - typed: [`Schema::write_values`] / [`Schema::read_values`] accept scalar
//!   slices and additionally check the element type against the descriptor.

use zerocopy::{AsBytes, FromZeroes};

use crate::error::{Result, SkipError};
use crate::schema::Schema;
use crate::types::{FieldDescriptor, Scalar};

impl Schema {
    /// Resolve a field access: descriptor, start offset, and byte length,
    /// with the index and buffer-range checks shared by read and write.
    fn locate(&self, index: usize, buf_len: usize) -> Result<(&FieldDescriptor, usize, usize)> {
        let descriptor = self.field(index).ok_or(SkipError::FieldOutOfBounds {
            index,
            count: self.field_count(),
        })?;
        // offset_of cannot fail once field() succeeded
        let offset = self.offset_of(index).unwrap_or(0);
        let byte_len = descriptor.byte_len();

        if offset + byte_len > buf_len {
            return Err(SkipError::BufferTooSmall {
                need: offset + byte_len,
                got: buf_len,
            });
        }
        Ok((descriptor, offset, byte_len))
    }

    /// Write one field's elements into `buf`.
    ///
    /// `src` holds the field's elements as host-order bytes and must be
    /// exactly the field's byte length. Single-byte element types are copied
    /// verbatim; multi-byte types are converted to the schema's declared
    /// order, element by element when it differs from the host.
    pub fn write_field(&self, buf: &mut [u8], index: usize, src: &[u8]) -> Result<()> {
        let (descriptor, offset, byte_len) = self.locate(index, buf.len())?;
        if src.len() != byte_len {
            return Err(SkipError::BufferTooSmall {
                need: byte_len,
                got: src.len(),
            });
        }

        let width = descriptor.field_type.width();
        self.endian()
            .pack_elements(width, src, &mut buf[offset..offset + byte_len]);
        Ok(())
    }

    /// Read one field's elements out of `buf` into `dst` as host-order bytes.
    ///
    /// Symmetric with [`write_field`](Self::write_field): same bounds checks,
    /// inverse conversion, same single-byte fast path.
    pub fn read_field(&self, buf: &[u8], index: usize, dst: &mut [u8]) -> Result<()> {
        let (descriptor, offset, byte_len) = self.locate(index, buf.len())?;
        if dst.len() != byte_len {
            return Err(SkipError::BufferTooSmall {
                need: byte_len,
                got: dst.len(),
            });
        }

        let width = descriptor.field_type.width();
        self.endian()
            .unpack_elements(width, &buf[offset..offset + byte_len], dst);
        Ok(())
    }

    /// Typed write: pack a scalar slice into field `index`.
    ///
    /// The scalar type must match the descriptor's element type and the slice
    /// length must equal the declared count.
    pub fn write_values<T: Scalar>(&self, buf: &mut [u8], index: usize, values: &[T]) -> Result<()> {
        self.check_scalar::<T>(index)?;
        self.write_field(buf, index, values.as_bytes())
    }

    /// Typed read: unpack field `index` into a freshly allocated scalar vec
    /// of the declared element count.
    pub fn read_values<T: Scalar>(&self, buf: &[u8], index: usize) -> Result<Vec<T>> {
        let count = self.check_scalar::<T>(index)?;
        let mut values = vec![T::new_zeroed(); count];
        self.read_field(buf, index, values.as_bytes_mut())?;
        Ok(values)
    }

    fn check_scalar<T: Scalar>(&self, index: usize) -> Result<usize> {
        let descriptor = self.field(index).ok_or(SkipError::FieldOutOfBounds {
            index,
            count: self.field_count(),
        })?;
        if descriptor.field_type != T::FIELD_TYPE {
            return Err(SkipError::TypeMismatch {
                field: descriptor.field_type,
                value: T::FIELD_TYPE,
            });
        }
        Ok(descriptor.count)
    }

    /// Zero-copy borrow of the byte range where field `index` lives.
    ///
    /// `None` when the index is past the field count or the buffer cannot
    /// hold the field's range. No byte-order conversion occurs, so this is
    /// only meaningful for byte-run fields (strings, raw arrays, nested
    /// envelopes); multi-byte numerics seen through it are in the declared
    /// wire order, not host order.
    pub fn field_slice<'a>(&self, buf: &'a [u8], index: usize) -> Option<&'a [u8]> {
        let descriptor = self.field(index)?;
        let offset = self.offset_of(index)?;
        buf.get(offset..offset + descriptor.byte_len())
    }
}
