//! # Header Protocol and Schema Body Serialization
//!
//! The fixed-size header is the self-describing prefix that lets a receiver
//! with zero prior schema knowledge validate a buffer and bootstrap decoding.
//! Its own endian byte is read first (a single byte is order-independent) and
//! determines how the remaining numeric header fields are interpreted — the
//! header is self-referential, never pinned to one canonical order.
//!
//! The serialized schema body is the portable flat encoding of the field
//! list: one 12-byte record per field (4-byte type code, 8-byte count) in
//! declared order, in the schema's byte order. Offset tables are never
//! serialized; they are rederived on import through the same append path
//! used for manual construction.

use zerocopy::{AsBytes, FromBytes, FromZeroes};

use crate::endian::Endian;
use crate::error::{Result, SkipError};
use crate::schema::Schema;
use crate::types::FieldType;
use crate::{SKIP_MAGIC, SKIP_VERSION};

/// Self-describing buffer prefix (32 bytes, no implicit padding)
///
/// ```text
/// offset  size  field
/// 0       4     magic      0x534B4950 ("SKIP")
/// 4       4     version    currently 1
/// 8       8     body_size  length of the following serialized schema body
/// 16      1     endian     0=big, 1=little; read first, order-independent
/// 17      15    reserved   zero-filled
/// ```
///
/// Field ordering is size-descending so the `#[repr(C)]` layout carries no
/// padding; the struct is exactly [`SkipHeader::SIZE`] bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes)]
pub struct SkipHeader {
    pub magic: u32,
    pub version: u32,
    pub body_size: u64,
    pub endian: u8,
    pub reserved: [u8; 15],
}

// Byte offsets within the header, shared by export and import.
const MAGIC_RANGE: std::ops::Range<usize> = 0..4;
const VERSION_RANGE: std::ops::Range<usize> = 4..8;
const BODY_SIZE_RANGE: std::ops::Range<usize> = 8..16;
const ENDIAN_OFFSET: usize = 16;

impl SkipHeader {
    /// Header size in bytes, independent of field count
    pub const SIZE: usize = 32;

    /// Build a header for the given tag and body size, numeric fields
    /// already in the declared byte order.
    fn encode(endian: Endian, body_size: u64) -> SkipHeader {
        let mut header = SkipHeader::new_zeroed();
        let bytes = header.as_bytes_mut();
        endian.write_u32(&mut bytes[MAGIC_RANGE], SKIP_MAGIC);
        endian.write_u32(&mut bytes[VERSION_RANGE], SKIP_VERSION);
        endian.write_u64(&mut bytes[BODY_SIZE_RANGE], body_size);
        bytes[ENDIAN_OFFSET] = endian.into();
        header
    }
}

/// Bytes per serialized field record: 4-byte type code + 8-byte count
pub const BODY_RECORD_SIZE: usize = 12;

impl Schema {
    /// Size of this schema's serialized body: `field_count × 12`.
    ///
    /// A pure function of the field list, independent of header size and of
    /// the packed data size.
    pub fn body_size(&self) -> usize {
        self.field_count() * BODY_RECORD_SIZE
    }

    /// Write the self-describing header into `buf`.
    ///
    /// Magic, version, and body size are written in this schema's byte
    /// order; the endian tag byte verbatim; reserved bytes zero-filled.
    /// Returns the computed body size so the caller can size the follow-on
    /// [`export_body`](Self::export_body) buffer.
    pub fn export_header(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < SkipHeader::SIZE {
            return Err(SkipError::BufferTooSmall {
                need: SkipHeader::SIZE,
                got: buf.len(),
            });
        }

        let body_size = self.body_size();
        let header = SkipHeader::encode(self.endian(), body_size as u64);
        buf[..SkipHeader::SIZE].copy_from_slice(header.as_bytes());
        Ok(body_size)
    }

    /// Validate a header and bootstrap decoding from it.
    ///
    /// The endian byte is read first and the remaining numeric fields are
    /// interpreted in that declared order. On success returns a fresh empty
    /// schema carrying the declared tag, plus the expected body size.
    pub fn import_header(buf: &[u8]) -> Result<(Schema, usize)> {
        if buf.len() < SkipHeader::SIZE {
            return Err(SkipError::BufferTooSmall {
                need: SkipHeader::SIZE,
                got: buf.len(),
            });
        }

        let endian = Endian::from_tag(buf[ENDIAN_OFFSET])?;

        let magic = endian.read_u32(&buf[MAGIC_RANGE]);
        if magic != SKIP_MAGIC {
            return Err(SkipError::BadMagic {
                expected: SKIP_MAGIC,
                actual: magic,
            });
        }

        let version = endian.read_u32(&buf[VERSION_RANGE]);
        if version != SKIP_VERSION {
            return Err(SkipError::UnsupportedVersion { version });
        }

        let body_size = endian.read_u64(&buf[BODY_SIZE_RANGE]);
        let body_size = usize::try_from(body_size).map_err(|_| SkipError::InvalidCount(body_size))?;

        Ok((Schema::with_endian(endian), body_size))
    }

    /// Serialize the field list into `buf` in this schema's byte order.
    pub fn export_body(&self, buf: &mut [u8]) -> Result<()> {
        self.export_body_as(self.endian(), buf)
    }

    /// Body export with an explicit tag. The nesting protocol forces the
    /// outer schema's byte order onto the embedded metadata so extraction
    /// can decode it without knowing the inner schema's own tag.
    pub(crate) fn export_body_as(&self, endian: Endian, buf: &mut [u8]) -> Result<()> {
        let need = self.body_size();
        if buf.len() < need {
            return Err(SkipError::BufferTooSmall {
                need,
                got: buf.len(),
            });
        }

        for (field, record) in self
            .fields()
            .iter()
            .zip(buf.chunks_exact_mut(BODY_RECORD_SIZE))
        {
            endian.write_u32(&mut record[0..4], field.field_type.into());
            endian.write_u64(&mut record[4..12], field.count as u64);
        }
        Ok(())
    }

    /// Decode a serialized body and append its fields to this schema.
    ///
    /// `buf` must be an exact multiple of the 12-byte record size. Every
    /// record is validated before any field is appended, so a malformed body
    /// leaves the schema untouched. Appending goes through the same
    /// [`push_field`](Self::push_field) used for manual construction, which
    /// rederives the offset table by construction.
    pub fn import_body(&mut self, buf: &[u8]) -> Result<()> {
        if buf.len() % BODY_RECORD_SIZE != 0 {
            return Err(SkipError::InvalidBodyLength {
                len: buf.len(),
                record: BODY_RECORD_SIZE,
            });
        }

        let endian = self.endian();
        let mut decoded = Vec::new();
        decoded
            .try_reserve(buf.len() / BODY_RECORD_SIZE)
            .map_err(|_| SkipError::AllocationFailed)?;

        for record in buf.chunks_exact(BODY_RECORD_SIZE) {
            let field_type = FieldType::from_code(endian.read_u32(&record[0..4]))?;
            let count = endian.read_u64(&record[4..12]);
            let count = usize::try_from(count).map_err(|_| SkipError::InvalidCount(count))?;
            decoded.push((field_type, count));
        }

        for (field_type, count) in decoded {
            self.push_field(field_type, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn test_header_struct_layout() {
        assert_eq!(std::mem::size_of::<SkipHeader>(), SkipHeader::SIZE);
        assert_eq!(SkipHeader::SIZE, 32);
    }

    #[test]
    fn test_export_header_little_endian_bytes() {
        let mut schema = Schema::with_endian(Endian::Little);
        schema.push_field(FieldType::UInt32, 1).unwrap();
        let mut buf = [0u8; SkipHeader::SIZE];
        let body_size = schema.export_header(&mut buf).unwrap();

        assert_eq!(body_size, 12);
        // magic "SKIP" little-endian, version 1, body_size 12, tag 1, zero fill
        assert_eq!(
            hex::encode(buf),
            "50494b53010000000c0000000000000001000000000000000000000000000000"
        );
    }

    #[test]
    fn test_export_header_big_endian_bytes() {
        let schema = Schema::with_endian(Endian::Big);
        let mut buf = [0u8; SkipHeader::SIZE];
        let body_size = schema.export_header(&mut buf).unwrap();

        assert_eq!(body_size, 0);
        assert_eq!(
            hex::encode(buf),
            "534b495000000001000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_header_roundtrip() {
        for endian in [Endian::Big, Endian::Little] {
            let mut schema = Schema::with_endian(endian);
            schema.push_field(FieldType::Int16, 5).unwrap();
            schema.push_field(FieldType::Char, 32).unwrap();

            let mut buf = [0u8; SkipHeader::SIZE];
            let exported_body_size = schema.export_header(&mut buf).unwrap();

            let (imported, body_size) = Schema::import_header(&buf).unwrap();
            assert_eq!(imported.endian(), endian);
            assert_eq!(body_size, exported_body_size);
            assert_eq!(body_size, schema.body_size());
            assert!(imported.is_empty());
        }
    }

    #[test]
    fn test_header_rejects_short_buffer() {
        let schema = Schema::new();
        let mut buf = [0u8; SkipHeader::SIZE - 1];
        assert_eq!(
            schema.export_header(&mut buf),
            Err(SkipError::BufferTooSmall { need: 32, got: 31 })
        );
        assert_eq!(
            Schema::import_header(&buf).unwrap_err(),
            SkipError::BufferTooSmall { need: 32, got: 31 }
        );
    }

    #[test]
    fn test_header_rejects_bad_magic_and_version() {
        let schema = Schema::with_endian(Endian::Little);
        let mut buf = [0u8; SkipHeader::SIZE];
        schema.export_header(&mut buf).unwrap();

        let mut corrupt = buf;
        corrupt[0] ^= 0xFF;
        assert!(matches!(
            Schema::import_header(&corrupt),
            Err(SkipError::BadMagic { .. })
        ));

        let mut corrupt = buf;
        corrupt[4] = 9; // version 9, little-endian
        assert_eq!(
            Schema::import_header(&corrupt).unwrap_err(),
            SkipError::UnsupportedVersion { version: 9 }
        );

        let mut corrupt = buf;
        corrupt[16] = 7; // nonsense endian tag
        assert_eq!(
            Schema::import_header(&corrupt).unwrap_err(),
            SkipError::InvalidEndian(7)
        );
    }

    #[test]
    fn test_body_roundtrip_preserves_field_list() {
        for endian in [Endian::Big, Endian::Little] {
            let mut original = Schema::with_endian(endian);
            original.push_field(FieldType::UInt32, 2).unwrap();
            original.push_field(FieldType::Char, 13).unwrap();
            original.push_field(FieldType::Float64, 0).unwrap();
            original.push_field(FieldType::Int64, 1).unwrap();

            let mut body = vec![0u8; original.body_size()];
            original.export_body(&mut body).unwrap();

            let mut imported = Schema::with_endian(endian);
            imported.import_body(&body).unwrap();

            assert_eq!(imported.fields(), original.fields());
            assert_eq!(imported.total_size(), original.total_size());
        }
    }

    #[test]
    fn test_body_record_wire_layout() {
        let mut schema = Schema::with_endian(Endian::Big);
        schema.push_field(FieldType::Nest, 300).unwrap();
        let mut body = [0u8; 12];
        schema.export_body(&mut body).unwrap();

        // type code 11 big-endian, count 300 big-endian
        assert_eq!(hex::encode(body), "0000000b000000000000012c");
    }

    #[test]
    fn test_import_body_rejects_ragged_length() {
        let mut schema = Schema::new();
        let err = schema.import_body(&[0u8; 13]).unwrap_err();
        assert_eq!(err, SkipError::InvalidBodyLength { len: 13, record: 12 });
        assert!(schema.is_empty());
    }

    #[test]
    fn test_import_body_rejects_unknown_type_without_mutation() {
        let mut body = [0u8; 24];
        let e = Endian::Little;
        e.write_u32(&mut body[0..4], FieldType::Int8.into());
        e.write_u64(&mut body[4..12], 4);
        e.write_u32(&mut body[12..16], 99); // no such type code
        e.write_u64(&mut body[16..24], 1);

        let mut schema = Schema::with_endian(Endian::Little);
        assert_eq!(
            schema.import_body(&body).unwrap_err(),
            SkipError::InvalidTypeCode(99)
        );
        // Even the valid first record must not have been applied.
        assert!(schema.is_empty());
    }

    #[test]
    fn test_export_body_rejects_short_buffer() {
        let mut schema = Schema::new();
        schema.push_field(FieldType::Int32, 1).unwrap();
        let mut buf = [0u8; 11];
        assert_eq!(
            schema.export_body(&mut buf),
            Err(SkipError::BufferTooSmall { need: 12, got: 11 })
        );
    }
}
