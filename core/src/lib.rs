//! record-core
//!
//! Binary record codec for a streaming pub-sub service.
//! Pure Rust, no FFI.
//!
//! A record is a 16-byte header, a field-count prefix, a null bitmap, a table
//! of 8-byte slots, a spill region for long strings and a trailing attribute
//! section. See `layout` for the geometry and `record` for the codec itself.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Wire primitives
pub mod buffer;
pub mod layout;
pub mod headers;

// Schema and codec
pub mod schema;
pub mod record;

// Above the codec
pub mod compression;
pub mod batch;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::batch::{
        compress_records, compress_records_with, concat_records, decompress_records, encode_records,
        encode_records_with, read_records, split_records, CompressedRecords, RecordIter,
    };
    pub use crate::compression::{create_compressor, CompressionCodec, CompressionError, Compressor};
    pub use crate::config::CodecConfig;
    pub use crate::headers::{peek_header, RecordHeader};
    pub use crate::record::{
        decode_record, encode_record, encode_record_with, Attributes, Record, RecordReader, RecordView, RecordWriter,
    };
    pub use crate::schema::{
        Decimal, FieldDescriptor, FieldType, FieldValue, InMemorySchemaRegistry, Schema,
        SchemaRegistry, TopicId,
    };
    pub use crate::telemetry::CodecCounters;
    pub use crate::types::{RecordError, RecordResult};
}
