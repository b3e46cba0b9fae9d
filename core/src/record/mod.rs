//! record/mod.rs
//! Binary record serializer / deserializer.
//!
//! Responsibilities:
//! - Field slots, null bitmap, inline/spill strings
//! - Attribute section
//! - Header finalisation and schema-aware lazy decoding
//!
//! Non-responsibilities:
//! - Compression (applied above, see `batch`)
//! - Transport and retries

pub mod types;
pub mod spill;
pub mod fields;
pub mod attributes;
pub mod encode;
pub mod decode;

pub use types::Record;
pub use attributes::Attributes;
pub use spill::StringPlacement;
pub use encode::{encode_record, encode_record_with, encode_record_with_stats, RecordWriter, WriterStats};
pub use decode::{decode_record, RecordReader, RecordView};
