//! # Schema - the authoritative layout description
//!
//! A [`Schema`] is an ordered field list plus a derived offset table and an
//! endian tag. Field order is the wire order: appending a field extends the
//! offset table with the cumulative byte size, so every field's position in a
//! packed buffer is known without scanning.
//!
//! The offset table invariant holds at every public-API boundary:
//! `offsets.len() == fields.len() + 1`, `offsets[0] == 0`, entries
//! non-decreasing, and `offsets[i + 1] - offsets[i]` equals field *i*'s byte
//! length. It is maintained incrementally on each mutation, never rebuilt.
//!
//! A schema exclusively owns its field list and offset table; both are
//! released together when the schema drops. Buffers packed against a schema
//! are always caller-owned — the codec never allocates, frees, or retains one
//! beyond a single call. Note that appending a field after sizing a buffer
//! invalidates that buffer's sufficiency; the caller must reallocate.

use serde::{Deserialize, Serialize};

use crate::endian::Endian;
use crate::error::{Result, SkipError};
use crate::types::{FieldDescriptor, FieldType};

/// Ordered field layout with derived offsets and a declared byte order
///
/// A serialized schema carries only the field list and the endian tag. The
/// offset table is derived state: deserialization rebuilds it through
/// [`push_field`](Self::push_field), so untrusted input can never smuggle in
/// a table that disagrees with the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaRepr", into = "SchemaRepr")]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    /// Cumulative byte offsets; one entry more than `fields`, starting at 0.
    offsets: Vec<usize>,
    endian: Endian,
}

/// Wire shape of [`Schema`], without the derived offset table
#[derive(Serialize, Deserialize)]
#[serde(rename = "Schema")]
struct SchemaRepr {
    fields: Vec<FieldDescriptor>,
    endian: Endian,
}

impl From<Schema> for SchemaRepr {
    fn from(schema: Schema) -> Self {
        Self {
            fields: schema.fields,
            endian: schema.endian,
        }
    }
}

impl TryFrom<SchemaRepr> for Schema {
    type Error = SkipError;

    fn try_from(repr: SchemaRepr) -> Result<Self> {
        let mut schema = Schema::with_endian(repr.endian);
        for field in repr.fields {
            schema.push_field(field.field_type, field.count)?;
        }
        Ok(schema)
    }
}

impl Schema {
    /// Empty schema with the host's native byte order
    pub fn new() -> Self {
        Self::with_endian(Endian::host())
    }

    /// Empty schema with an explicit byte order
    pub fn with_endian(endian: Endian) -> Self {
        Self {
            fields: Vec::new(),
            offsets: vec![0],
            endian,
        }
    }

    /// Append a field to the end of the layout.
    ///
    /// Extends the offset table with the new cumulative size. A zero count is
    /// accepted and contributes zero bytes. Storage growth is reserved up
    /// front so a failed allocation leaves the schema in its last-good state
    /// with the append not applied.
    pub fn push_field(&mut self, field_type: FieldType, count: usize) -> Result<()> {
        self.fields
            .try_reserve(1)
            .map_err(|_| SkipError::AllocationFailed)?;
        self.offsets
            .try_reserve(1)
            .map_err(|_| SkipError::AllocationFailed)?;

        let byte_len = field_type
            .width()
            .checked_mul(count)
            .ok_or(SkipError::InvalidCount(count as u64))?;
        let next_offset = self
            .total_size()
            .checked_add(byte_len)
            .ok_or(SkipError::InvalidCount(count as u64))?;
        self.fields.push(FieldDescriptor::new(field_type, count));
        self.offsets.push(next_offset);
        Ok(())
    }

    /// Remove the most recently appended field.
    ///
    /// Silent no-op on an empty schema.
    pub fn pop_field(&mut self) {
        if self.fields.pop().is_some() {
            self.offsets.pop();
        }
    }

    /// Descriptor at `index`, or `None` past the end. Non-allocating.
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Byte offset where field `index` begins in a packed buffer
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        if index < self.fields.len() {
            Some(self.offsets[index])
        } else {
            None
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total packed size in bytes of a buffer laid out by this schema
    pub fn total_size(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }

    /// Declared byte order of values packed through this schema
    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub(crate) fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}
