//! record/encode.rs
//!
//! Record serializer.
//!
//! Design notes:
//! - The buffer is allocated zeroed at its minimum size: header, field-count
//!   prefix, bitmap and slot table. Spilled strings grow it from the end.
//! - The header is written last, once the spill region is sealed and the
//!   attribute section has been appended.
//! - `totalSize = attr_offset + 4 + attribute bytes`.

use std::sync::Arc;
use bytes::Bytes;
use log::debug;

use crate::buffer::{ByteBuf, ByteView};
use crate::config::CodecConfig;
use crate::constants::{BLOB_FIELD_COUNT, DEFAULT_MAX_RECORD_SIZE, MAX_RECORD_SIZE, SCHEMALESS_VERSION};
use crate::headers::{encode_header_le, HeaderError, RecordHeader};
use crate::layout::{self, RecordLayout};
use crate::record::attributes::{attribute_section_len, encode_attributes, Attributes};
use crate::record::fields::{clear_field, encode_field};
use crate::record::spill::StringPlacement;
use crate::record::types::Record;
use crate::schema::{FieldType, FieldValue, Schema};
use crate::types::{RecordError, RecordResult};

/// Per-record write statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub inline_strings: u64,
    pub spilled_strings: u64,
    /// Spill bytes including alignment padding.
    pub spill_bytes: u64,
    pub attributes: u64,
}

impl WriterStats {
    fn record(&mut self, placement: StringPlacement) {
        match placement {
            StringPlacement::Inline { .. } => self.inline_strings += 1,
            StringPlacement::Spilled { .. } => self.spilled_strings += 1,
        }
    }
}

/// Builds one encoded record. Owns its buffer until `finish`.
#[derive(Debug)]
pub struct RecordWriter {
    schema: Option<Arc<Schema>>,
    layout: RecordLayout,
    buf: ByteBuf,
    attributes: Attributes,
    stats: WriterStats,
    max_record_size: usize,
}

impl RecordWriter {
    pub fn new(schema: Arc<Schema>) -> Self {
        let layout = RecordLayout::new(schema.field_count());
        Self::with_layout(Some(schema), layout)
    }

    /// Writer for a schemaless record with one raw-bytes field.
    pub fn blob() -> Self {
        Self::with_layout(None, RecordLayout::new(BLOB_FIELD_COUNT))
    }

    fn with_layout(schema: Option<Arc<Schema>>, layout: RecordLayout) -> Self {
        let buf = ByteBuf::zeroed(layout.min_allocation());
        Self {
            schema,
            layout,
            buf,
            attributes: Attributes::new(),
            stats: WriterStats::default(),
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
        }
    }

    pub fn with_max_record_size(mut self, max: usize) -> Self {
        self.max_record_size = max.min(MAX_RECORD_SIZE);
        self
    }

    pub fn with_config(self, config: &CodecConfig) -> Self {
        self.with_max_record_size(config.max_record_size)
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.layout.field_count()
    }

    #[inline]
    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    #[inline]
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    fn declared_type(&self, index: usize) -> Option<FieldType> {
        self.schema
            .as_ref()
            .and_then(|s| s.field(index))
            .map(|f| f.field_type)
    }

    /// Encode `value` into field `index`.
    pub fn set_field(&mut self, index: usize, value: &FieldValue) -> RecordResult<()> {
        let declared = self.declared_type(index);
        let before = self.buf.len();
        let placement = encode_field(&mut self.buf, &self.layout, declared, index, value)?;
        if let Some(p) = placement {
            self.stats.record(p);
            self.stats.spill_bytes += (self.buf.len() - before) as u64;
        }
        Ok(())
    }

    /// Mark field `index` absent. Fails on non-nullable fields.
    pub fn set_null(&mut self, index: usize) -> RecordResult<()> {
        if let Some(f) = self.schema.as_ref().and_then(|s| s.field(index)) {
            if !f.nullable {
                return Err(RecordError::MissingRequiredField { index, name: f.name.clone() });
            }
        }
        clear_field(&mut self.buf, &self.layout, index)
    }

    pub fn set_field_by_name(&mut self, name: &str, value: &FieldValue) -> RecordResult<()> {
        let index = self
            .schema
            .as_ref()
            .and_then(|s| s.index_of(name))
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        self.set_field(index, value)
    }

    pub fn put_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Attributes collected so far; readable before the header exists.
    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Header as it would read right now, before finalisation (encoding tag 0).
    pub fn pending_header(&self) -> RecordHeader {
        RecordHeader::placeholder(self.schema_version())
    }

    fn schema_version(&self) -> i32 {
        self.schema.as_ref().map_or(SCHEMALESS_VERSION, |s| s.version())
    }

    fn check_required(&self) -> RecordResult<()> {
        let Some(schema) = self.schema.as_ref() else {
            return Ok(());
        };
        let view = ByteView::new(self.buf.as_slice());
        for (index, f) in schema.fields().iter().enumerate() {
            if !f.nullable && !layout::is_present(&view, index)? {
                return Err(RecordError::MissingRequiredField { index, name: f.name.clone() });
            }
        }
        Ok(())
    }

    /// Seal the spill region, append attributes and write the header.
    pub fn finish(mut self) -> RecordResult<Bytes> {
        // Negative versions read back as schemaless or fail header validation.
        let version = self.schema_version();
        if self.schema.is_some() && version < 0 {
            return Err(HeaderError::InvalidSchemaVersion { have: version }.into());
        }
        self.check_required()?;

        let attr_offset = self.buf.len();
        let total_size = attr_offset + attribute_section_len(&self.attributes);
        if total_size > self.max_record_size {
            return Err(RecordError::RecordTooLarge { size: total_size, max: self.max_record_size });
        }

        let field_count = u32::try_from(self.layout.field_count())
            .map_err(|_| RecordError::RecordTooLarge { size: total_size, max: self.max_record_size })?;
        self.buf.write_u32_at(RecordLayout::FIELD_COUNT_OFFSET, field_count)?;

        encode_attributes(&mut self.buf, &self.attributes)?;
        debug_assert_eq!(self.buf.len(), total_size);
        self.stats.attributes = self.attributes.len() as u64;

        let header = RecordHeader::new(version, total_size as u32, attr_offset as u32);
        self.buf.write_at(0, &encode_header_le(&header))?;

        debug!("finished record: {}", header.summary());
        Ok(self.buf.freeze())
    }

    /// Like `finish`, also returning the writer statistics.
    pub fn finish_with_stats(mut self) -> RecordResult<(Bytes, WriterStats)> {
        let mut stats = std::mem::take(&mut self.stats);
        stats.attributes = self.attributes.len() as u64;
        let bytes = self.finish()?;
        Ok((bytes, stats))
    }
}

/// Encode a logical record in one call.
pub fn encode_record(record: &Record) -> RecordResult<Bytes> {
    encode_record_with_stats(record).map(|(bytes, _)| bytes)
}

/// Encode under `config`'s record size limit.
pub fn encode_record_with(record: &Record, config: &CodecConfig) -> RecordResult<Bytes> {
    encode_with_stats(record, config).map(|(bytes, _)| bytes)
}

pub fn encode_record_with_stats(record: &Record) -> RecordResult<(Bytes, WriterStats)> {
    encode_with_stats(record, &CodecConfig::default())
}

pub(crate) fn encode_with_stats(record: &Record, config: &CodecConfig) -> RecordResult<(Bytes, WriterStats)> {
    let writer = match record.schema() {
        Some(schema) => RecordWriter::new(Arc::clone(schema)),
        None => RecordWriter::blob(),
    };
    let mut writer = writer.with_config(config);

    for (index, value) in record.values().iter().enumerate() {
        if let Some(v) = value {
            writer.set_field(index, v)?;
        }
    }
    for (k, v) in record.attributes() {
        writer.put_attribute(k.clone(), v.clone());
    }

    writer.finish_with_stats()
}
