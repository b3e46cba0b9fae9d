use thiserror::Error;

use crate::{
    buffer::BufferError,
    compression::CompressionError,
    headers::HeaderError,
    schema::{FieldType, RegistryError, SchemaError},
};

pub type RecordResult<T, E = RecordError> = Result<T, E>;

/// Unified codec error covering encode, decode, schema resolution and compression.
/// - `From<T>` impls enable `?` across layers.
/// - Nothing here is retried by the codec; the caller decides.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("field index {index} out of range for {field_count} fields")]
    FieldIndexOutOfRange { index: usize, field_count: usize },

    #[error("field {index} declared {expected}, got {actual}")]
    FieldTypeMismatch { index: usize, expected: &'static str, actual: &'static str },

    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),

    #[error("insufficient buffer length: need {needed} bytes, have {available}")]
    InsufficientBufferLength { needed: usize, available: usize },

    #[error("attribute section malformed: {0}")]
    AttributeParseError(String),

    #[error("field {index} ({name}) is not nullable")]
    MissingRequiredField { index: usize, name: String },

    #[error("unknown field name: {0}")]
    UnknownField(String),

    #[error("record declares schema version {version} but no schema or registry is configured")]
    SchemaUnavailable { version: i32 },

    #[error("schema has {schema_fields} fields, record has {record_fields}")]
    SchemaMismatch { schema_fields: usize, record_fields: usize },

    #[error("record size {size} exceeds limit {max}")]
    RecordTooLarge { size: usize, max: usize },

    #[error("field {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    #[error("record is corrupt: {0}")]
    Corrupt(String),

    #[error("header error: {0}")]
    Header(HeaderError),

    #[error("schema error: {0}")]
    Schema(SchemaError),

    #[error("schema registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("config error: {0}")]
    Config(String),
}

impl RecordError {
    pub(crate) fn type_mismatch(index: usize, expected: FieldType, actual: &'static str) -> Self {
        RecordError::FieldTypeMismatch { index, expected: expected.name(), actual }
    }
}

impl From<HeaderError> for RecordError {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::BufferTooShort { have, need } =>
                RecordError::InsufficientBufferLength { needed: need, available: have },
            other => RecordError::Header(other),
        }
    }
}

impl From<SchemaError> for RecordError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::UnknownTypeTag { .. } | SchemaError::UnknownTypeName { .. } =>
                RecordError::UnsupportedFieldType(e.to_string()),
            other => RecordError::Schema(other),
        }
    }
}

/// A buffer access outside the record means the offsets inside it lie.
impl From<BufferError> for RecordError {
    fn from(e: BufferError) -> Self {
        RecordError::Corrupt(e.to_string())
    }
}
