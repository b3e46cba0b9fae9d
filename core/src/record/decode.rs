//! record/decode.rs
//!
//! Record deserializer.
//!
//! Design notes:
//! - The header is read first; the reader then takes exactly `total_size`
//!   bytes as the record and leaves anything after it alone.
//! - Schema resolution happens before any field is touched: a locally
//!   supplied schema wins, otherwise the configured registry is asked.
//! - Fields and attributes are materialised lazily and cached. Each cache is
//!   a `OnceCell`, so the unparsed -> parsed transition runs once even when a
//!   view is shared across threads.

use std::sync::Arc;
use bytes::Bytes;
use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::buffer::ByteView;
use crate::config::CodecConfig;
use crate::constants::BLOB_FIELD_COUNT;
use crate::headers::{decode_header_le, RecordHeader};
use crate::layout::RecordLayout;
use crate::record::attributes::{parse_attributes, Attributes};
use crate::record::fields::{FieldDecoder, BLOB_TYPE_NAME};
use crate::record::types::Record;
use crate::schema::{FieldType, FieldValue, Schema, SchemaRegistry, TopicId};
use crate::types::{RecordError, RecordResult};

/// Decodes records against a local schema and/or a schema registry.
#[derive(Clone)]
pub struct RecordReader {
    config: CodecConfig,
    schema: Option<Arc<Schema>>,
    registry: Option<(Arc<dyn SchemaRegistry>, TopicId)>,
}

impl RecordReader {
    pub fn new(config: CodecConfig) -> Self {
        Self { config, schema: None, registry: None }
    }

    /// Use `schema` for every typed record this reader sees.
    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Resolve schemas for `topic` through `registry` when no local schema is set.
    pub fn with_registry(mut self, registry: Arc<dyn SchemaRegistry>, topic: TopicId) -> Self {
        self.registry = Some((registry, topic));
        self
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode the record at the start of `buf`.
    pub fn read(&self, buf: &Bytes) -> RecordResult<RecordView> {
        let header = decode_header_le(buf)?;
        header.validate()?;

        // A short buffer is reported as such whatever size the header claims.
        let total = header.total_size as usize;
        if buf.len() < total {
            return Err(RecordError::InsufficientBufferLength { needed: total, available: buf.len() });
        }
        if total > self.config.max_record_size {
            return Err(RecordError::RecordTooLarge { size: total, max: self.config.max_record_size });
        }
        let bytes = buf.slice(..total);

        let field_count = ByteView::new(&bytes).read_u32(RecordLayout::FIELD_COUNT_OFFSET)? as usize;
        let attr_offset = header.attr_offset as usize;
        let layout = RecordLayout::new(field_count);
        if layout.min_allocation() > attr_offset {
            return Err(RecordError::Corrupt(format!(
                "{} fields need {} bytes before the attribute section at {}",
                field_count, layout.min_allocation(), attr_offset
            )));
        }

        let schema = self.resolve_schema(&header, field_count)?;
        debug!("read record: {} fields={}", header.summary(), field_count);

        Ok(RecordView::new(bytes, header, schema, layout, self.config.strict_utf8))
    }

    fn resolve_schema(&self, header: &RecordHeader, field_count: usize) -> RecordResult<Option<Arc<Schema>>> {
        let Some(version) = header.schema_version() else {
            if field_count != BLOB_FIELD_COUNT {
                return Err(RecordError::SchemaMismatch {
                    schema_fields: BLOB_FIELD_COUNT,
                    record_fields: field_count,
                });
            }
            return Ok(None);
        };

        let schema = match (&self.schema, &self.registry) {
            (Some(local), _) => {
                if local.version() != version {
                    warn!("record schema version {} decoded with local schema version {}", version, local.version());
                }
                Arc::clone(local)
            }
            (None, Some((registry, topic))) => {
                debug!("resolving schema version {} for {}", version, topic);
                registry.resolve_schema(topic, version)?
            }
            (None, None) => return Err(RecordError::SchemaUnavailable { version }),
        };

        if schema.field_count() != field_count {
            return Err(RecordError::SchemaMismatch {
                schema_fields: schema.field_count(),
                record_fields: field_count,
            });
        }
        Ok(Some(schema))
    }
}

impl std::fmt::Debug for RecordReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordReader")
            .field("config", &self.config)
            .field("schema", &self.schema)
            .field("topic", &self.registry.as_ref().map(|(_, t)| t))
            .finish()
    }
}

/// Lazily decoded record.
///
/// Owns exactly `total_size` bytes. Field values and the attribute map are
/// parsed on first access and cached; the underlying bytes never change.
#[derive(Debug)]
pub struct RecordView {
    bytes: Bytes,
    header: RecordHeader,
    schema: Option<Arc<Schema>>,
    layout: RecordLayout,
    strict_utf8: bool,
    fields: Vec<OnceCell<Option<FieldValue>>>,
    attributes: OnceCell<Attributes>,
}

impl RecordView {
    fn new(bytes: Bytes, header: RecordHeader, schema: Option<Arc<Schema>>, layout: RecordLayout, strict_utf8: bool) -> Self {
        let fields = (0..layout.field_count()).map(|_| OnceCell::new()).collect();
        Self { bytes, header, schema, layout, strict_utf8, fields, attributes: OnceCell::new() }
    }

    #[inline]
    pub fn header(&self) -> &RecordHeader {
        &self.header
    }

    #[inline]
    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.layout.field_count()
    }

    /// Bytes consumed from the input buffer.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    fn decoder(&self) -> FieldDecoder<'_> {
        FieldDecoder {
            bytes: &self.bytes,
            layout: &self.layout,
            spill_range: self.layout.min_allocation()..self.header.attr_offset as usize,
            strict_utf8: self.strict_utf8,
        }
    }

    fn declared_type(&self, index: usize) -> Option<FieldType> {
        self.schema.as_ref().and_then(|s| s.field(index)).map(|f| f.field_type)
    }

    pub fn is_present(&self, index: usize) -> RecordResult<bool> {
        self.decoder().is_present(index)
    }

    /// Field `index`, decoded once and cached. `None` means absent.
    pub fn field(&self, index: usize) -> RecordResult<Option<&FieldValue>> {
        let cell = self.fields.get(index).ok_or(RecordError::FieldIndexOutOfRange {
            index,
            field_count: self.field_count(),
        })?;
        let value = cell.get_or_try_init(|| self.decoder().decode(self.declared_type(index), index))?;
        Ok(value.as_ref())
    }

    pub fn field_by_name(&self, name: &str) -> RecordResult<Option<&FieldValue>> {
        let index = self
            .schema
            .as_ref()
            .and_then(|s| s.index_of(name))
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        self.field(index)
    }

    fn mismatch(&self, index: usize, value: &FieldValue) -> RecordError {
        match self.declared_type(index) {
            Some(t) => RecordError::type_mismatch(index, t, value.type_name()),
            None => RecordError::FieldTypeMismatch { index, expected: BLOB_TYPE_NAME, actual: value.type_name() },
        }
    }

    pub fn get_bool(&self, index: usize) -> RecordResult<Option<bool>> {
        match self.field(index)? {
            None => Ok(None),
            Some(FieldValue::Boolean(v)) => Ok(Some(*v)),
            Some(other) => Err(RecordError::FieldTypeMismatch {
                index,
                expected: FieldType::Boolean.name(),
                actual: other.type_name(),
            }),
        }
    }

    /// Any integer-typed or timestamp field, widened to i64.
    pub fn get_i64(&self, index: usize) -> RecordResult<Option<i64>> {
        match self.field(index)? {
            None => Ok(None),
            Some(FieldValue::TinyInt(v)) => Ok(Some(*v as i64)),
            Some(FieldValue::SmallInt(v)) => Ok(Some(*v as i64)),
            Some(FieldValue::Integer(v)) => Ok(Some(*v as i64)),
            Some(FieldValue::BigInt(v)) | Some(FieldValue::Timestamp(v)) => Ok(Some(*v)),
            Some(other) => Err(RecordError::FieldTypeMismatch {
                index,
                expected: FieldType::BigInt.name(),
                actual: other.type_name(),
            }),
        }
    }

    /// FLOAT or DOUBLE field, widened to f64.
    pub fn get_f64(&self, index: usize) -> RecordResult<Option<f64>> {
        match self.field(index)? {
            None => Ok(None),
            Some(FieldValue::Float(v)) => Ok(Some(*v as f64)),
            Some(FieldValue::Double(v)) => Ok(Some(*v)),
            Some(other) => Err(RecordError::FieldTypeMismatch {
                index,
                expected: FieldType::Double.name(),
                actual: other.type_name(),
            }),
        }
    }

    /// STRING or DECIMAL field as text.
    pub fn get_str(&self, index: usize) -> RecordResult<Option<&str>> {
        match self.field(index)? {
            None => Ok(None),
            Some(FieldValue::String(s)) => Ok(Some(s.as_str())),
            Some(FieldValue::Decimal(d)) => Ok(Some(d.as_str())),
            Some(other) => Err(self.mismatch(index, other)),
        }
    }

    /// Raw payload of a blob record.
    pub fn get_bytes(&self, index: usize) -> RecordResult<Option<&Bytes>> {
        match self.field(index)? {
            None => Ok(None),
            Some(FieldValue::Bytes(b)) => Ok(Some(b)),
            Some(other) => Err(self.mismatch(index, other)),
        }
    }

    /// Attribute map, parsed on first call.
    pub fn attributes(&self) -> RecordResult<&Attributes> {
        self.attributes
            .get_or_try_init(|| parse_attributes(&self.bytes, self.header.attr_offset as usize))
    }

    pub fn attribute(&self, key: &str) -> RecordResult<Option<&str>> {
        Ok(self.attributes()?.get(key).map(String::as_str))
    }

    #[inline]
    pub fn attributes_parsed(&self) -> bool {
        self.attributes.get().is_some()
    }

    /// Materialise every field and attribute into an owned `Record`.
    pub fn to_record(&self) -> RecordResult<Record> {
        let values = (0..self.field_count())
            .map(|i| self.field(i).map(|v| v.cloned()))
            .collect::<RecordResult<Vec<_>>>()?;
        Ok(Record::from_parts(self.schema.clone(), values, self.attributes()?.clone()))
    }
}

/// Decode one record with a fixed schema (or none, for blobs) and default config.
pub fn decode_record(buf: &Bytes, schema: Option<Arc<Schema>>) -> RecordResult<Record> {
    let mut reader = RecordReader::new(CodecConfig::default());
    if let Some(s) = schema {
        reader = reader.with_schema(s);
    }
    reader.read(buf)?.to_record()
}
