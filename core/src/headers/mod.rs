//! headers/mod.rs
//! Public module export for the 16-byte record frame header.
//!
//! Wire notes:
//! - Fixed-size header (16 bytes) prefixes every record.
//! - Four little-endian 32-bit fields: encoding type, schema version,
//!   total record size, attribute-section offset.
//! - Schema version -1 marks a schemaless (blob) record.
//! - Written last on encode, once the spill region is sealed and the
//!   attribute section size is known; read first on decode.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
