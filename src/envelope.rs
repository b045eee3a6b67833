//! # Envelopes - nesting and standalone transmission units
//!
//! Two ways to make a packed buffer self-describing:
//!
//! - **Nested envelope**: a sub-schema's serialized body plus its payload,
//!   length-prefixed and embedded as one byte-run field of an outer schema.
//!   All envelope metadata — the 8-byte length prefix *and* the body records —
//!   is written in the **outer** schema's byte order, so extraction needs no
//!   knowledge of the inner schema's own tag. One level of nesting only.
//!
//! - **Standalone envelope**: header + serialized body + payload concatenated
//!   into one transmissible unit. A receiver imports the header, then the
//!   body, and can then read payload fields by index with zero prior schema
//!   knowledge.

use crate::error::{Result, SkipError};
use crate::header::SkipHeader;
use crate::schema::Schema;

/// Width of the nested envelope's length prefix
const META_SIZE_PREFIX: usize = 8;

impl Schema {
    /// Bytes a nested envelope occupies for `inner` with a payload of
    /// `payload_len` bytes. The embedding byte-run field of the outer schema
    /// must have at least this count.
    pub fn nested_size(inner: &Schema, payload_len: usize) -> usize {
        META_SIZE_PREFIX + inner.body_size() + payload_len
    }

    /// Build a nested envelope for `inner` and its packed `payload` into
    /// `dest`, using this (outer) schema's byte order for the metadata.
    ///
    /// The result is self-delimiting: an 8-byte metadata size, the inner
    /// schema's serialized body, then the raw payload. Returns the number of
    /// bytes written.
    pub fn export_nested(&self, inner: &Schema, payload: &[u8], dest: &mut [u8]) -> Result<usize> {
        let meta_size = inner.body_size();
        let need = Self::nested_size(inner, payload.len());
        if dest.len() < need {
            return Err(SkipError::BufferTooSmall {
                need,
                got: dest.len(),
            });
        }

        let endian = self.endian();
        endian.write_u64(&mut dest[..META_SIZE_PREFIX], meta_size as u64);
        inner.export_body_as(endian, &mut dest[META_SIZE_PREFIX..META_SIZE_PREFIX + meta_size])?;
        dest[META_SIZE_PREFIX + meta_size..need].copy_from_slice(payload);
        Ok(need)
    }

    /// Decode the length prefix and bounds-check the envelope, returning the
    /// metadata size. Shared by schema and payload extraction so both derive
    /// it identically.
    fn nested_meta_size(&self, nest: &[u8]) -> Result<usize> {
        if nest.len() < META_SIZE_PREFIX {
            return Err(SkipError::BufferTooSmall {
                need: META_SIZE_PREFIX,
                got: nest.len(),
            });
        }
        let declared = self.endian().read_u64(&nest[..META_SIZE_PREFIX]);
        // The prefix comes off the wire; both the usize conversion and the
        // envelope-size sum must survive a hostile declared length.
        let meta_size = usize::try_from(declared).map_err(|_| SkipError::InvalidCount(declared))?;
        let need = META_SIZE_PREFIX
            .checked_add(meta_size)
            .ok_or(SkipError::InvalidCount(declared))?;
        if nest.len() < need {
            return Err(SkipError::BufferTooSmall {
                need,
                got: nest.len(),
            });
        }
        Ok(meta_size)
    }

    /// Recover the inner schema from a nested envelope.
    ///
    /// This (outer) schema's byte order is propagated to the returned schema
    /// before its body is imported, since the envelope metadata was written
    /// in the outer order.
    pub fn import_nested_schema(&self, nest: &[u8]) -> Result<Schema> {
        let meta_size = self.nested_meta_size(nest)?;
        let mut inner = Schema::with_endian(self.endian());
        inner.import_body(&nest[META_SIZE_PREFIX..META_SIZE_PREFIX + meta_size])?;
        Ok(inner)
    }

    /// Copy a nested envelope's trailing payload into `out`, returning its
    /// length. The metadata size is rederived exactly as in
    /// [`import_nested_schema`](Self::import_nested_schema).
    pub fn import_nested_payload(&self, nest: &[u8], out: &mut [u8]) -> Result<usize> {
        let meta_size = self.nested_meta_size(nest)?;
        let payload = &nest[META_SIZE_PREFIX + meta_size..];
        if out.len() < payload.len() {
            return Err(SkipError::BufferTooSmall {
                need: payload.len(),
                got: out.len(),
            });
        }
        out[..payload.len()].copy_from_slice(payload);
        Ok(payload.len())
    }

    /// Bytes a standalone envelope of this schema occupies:
    /// header + serialized body + packed data.
    pub fn standalone_size(&self) -> usize {
        SkipHeader::SIZE + self.body_size() + self.total_size()
    }

    /// Concatenate header, serialized body, and the packed `data` buffer into
    /// one transmissible unit. `data` must be exactly
    /// [`total_size`](Self::total_size) bytes, since the receiver recovers the
    /// data region from the schema's layout alone. Returns the number of bytes
    /// written.
    pub fn export_standalone(&self, data: &[u8], dest: &mut [u8]) -> Result<usize> {
        if data.len() != self.total_size() {
            return Err(SkipError::BufferTooSmall {
                need: self.total_size(),
                got: data.len(),
            });
        }
        let need = self.standalone_size();
        if dest.len() < need {
            return Err(SkipError::BufferTooSmall {
                need,
                got: dest.len(),
            });
        }

        let body_size = self.export_header(&mut dest[..SkipHeader::SIZE])?;
        self.export_body(&mut dest[SkipHeader::SIZE..SkipHeader::SIZE + body_size])?;
        dest[SkipHeader::SIZE + body_size..need].copy_from_slice(data);
        Ok(need)
    }

    /// Rebuild a schema from a standalone envelope: header first, then the
    /// serialized body that follows it. The first failing step's error
    /// propagates. The data region of the envelope starts at
    /// `SkipHeader::SIZE + body_size()`.
    pub fn import_standalone(buf: &[u8]) -> Result<Schema> {
        let (mut schema, body_size) = Schema::import_header(buf)?;
        let body = buf
            .get(SkipHeader::SIZE..SkipHeader::SIZE + body_size)
            .ok_or(SkipError::BufferTooSmall {
                need: SkipHeader::SIZE + body_size,
                got: buf.len(),
            })?;
        schema.import_body(body)?;
        Ok(schema)
    }

    /// Copy the data region of a standalone envelope into `out`.
    ///
    /// `self` is normally the schema returned by
    /// [`import_standalone`](Self::import_standalone) for the same buffer.
    /// Returns the copied length, which is [`total_size`](Self::total_size).
    pub fn import_standalone_data(&self, buf: &[u8], out: &mut [u8]) -> Result<usize> {
        let data_len = self.total_size();
        if out.len() < data_len {
            return Err(SkipError::BufferTooSmall {
                need: data_len,
                got: out.len(),
            });
        }

        let start = SkipHeader::SIZE + self.body_size();
        let data = buf
            .get(start..start + data_len)
            .ok_or(SkipError::BufferTooSmall {
                need: start + data_len,
                got: buf.len(),
            })?;
        out[..data_len].copy_from_slice(data);
        Ok(data_len)
    }
}
