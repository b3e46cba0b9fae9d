//! headers/types.rs
//! Record frame header and its error type.

use std::fmt;
use num_enum::TryFromPrimitive;

use crate::constants::{encoding_ids, ATTRIBUTE_COUNT_LEN, FIELD_COUNT_LEN, RECORD_HEADER_LEN, SCHEMALESS_VERSION};
use crate::utils::enum_name_or_hex;

/// Fixed header size in bytes.
pub const HEADER_LEN: usize = RECORD_HEADER_LEN;

/// Encoding type tag (first header word).
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum EncodingType {
    /// Placeholder header for a record still being built; never valid on the wire.
    Reserved = encoding_ids::RESERVED,
    Binary   = encoding_ids::BINARY,
}

impl EncodingType {
    pub fn verify(raw: u32) -> Result<(), HeaderError> {
        match raw {
            x if x == EncodingType::Binary as u32   => Ok(()),
            x if x == EncodingType::Reserved as u32 => Err(HeaderError::ReservedEncoding),
            _ => Err(HeaderError::UnknownEncoding { raw }),
        }
    }
}

/// Record frame header.
/// - `attr_offset` is absolute from the start of the record and equals the
///   end of the slot table plus spill region.
/// - `total_size` covers header, data, and attribute section.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub encoding_type: u32,   // encoding tag (1 = binary)
    pub schema_version: i32,  // -1 for schemaless
    pub total_size: u32,      // whole record, header included
    pub attr_offset: u32,     // start of attribute section
}

impl RecordHeader {
    pub const LEN: usize = 4  // encoding_type
        + 4                  // schema_version
        + 4                  // total_size
        + 4;                 // attr_offset

    /// Smallest record the service accepts: header, field-count prefix, attribute count.
    pub const MIN_TOTAL_SIZE: usize = RECORD_HEADER_LEN + FIELD_COUNT_LEN + ATTRIBUTE_COUNT_LEN;

    pub fn new(schema_version: i32, total_size: u32, attr_offset: u32) -> Self {
        Self {
            encoding_type: EncodingType::Binary as u32,
            schema_version,
            total_size,
            attr_offset,
        }
    }

    /// Header that has not been finalised yet (tag 0).
    pub fn placeholder(schema_version: i32) -> Self {
        Self {
            encoding_type: EncodingType::Reserved as u32,
            schema_version,
            total_size: 0,
            attr_offset: 0,
        }
    }

    #[inline]
    pub fn is_schemaless(&self) -> bool {
        self.schema_version == SCHEMALESS_VERSION
    }

    /// Schema version if the record declares one.
    #[inline]
    pub fn schema_version(&self) -> Option<i32> {
        if self.schema_version >= 0 { Some(self.schema_version) } else { None }
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        EncodingType::verify(self.encoding_type)?;

        if self.schema_version < SCHEMALESS_VERSION {
            return Err(HeaderError::InvalidSchemaVersion { have: self.schema_version });
        }

        let total = self.total_size as usize;
        if total < Self::MIN_TOTAL_SIZE {
            return Err(HeaderError::TotalSizeTooSmall { have: total, min: Self::MIN_TOTAL_SIZE });
        }

        // Attribute count must fit between attr_offset and the end of the record.
        let attr = self.attr_offset as usize;
        if attr < RECORD_HEADER_LEN + FIELD_COUNT_LEN || attr + ATTRIBUTE_COUNT_LEN > total {
            return Err(HeaderError::AttributeOffsetOutOfRange {
                attr_offset: self.attr_offset,
                total_size: self.total_size,
            });
        }

        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "RecordHeader {{ encoding: {}, schema_version: {}, total_size: {}, attr_offset: {} }}",
            enum_name_or_hex::<EncodingType>(self.encoding_type),
            self.schema_version,
            self.total_size,
            self.attr_offset,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer too short to contain a header.
    BufferTooShort { have: usize, need: usize },

    /// Encoding tag is not one we know.
    UnknownEncoding { raw: u32 },

    /// Encoding tag 0 only exists on records that were never finalised.
    ReservedEncoding,

    /// Schema version below -1.
    InvalidSchemaVersion { have: i32 },

    /// Declared total size cannot hold the fixed regions.
    TotalSizeTooSmall { have: usize, min: usize },

    /// Attribute section would start outside the record.
    AttributeOffsetOutOfRange { attr_offset: u32, total_size: u32 },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            BufferTooShort { have, need } =>
                write!(f, "header buffer too short: {} < {}", have, need),
            UnknownEncoding { raw } =>
                write!(f, "unknown encoding type: {}", enum_name_or_hex::<EncodingType>(*raw)),
            ReservedEncoding =>
                write!(f, "reserved encoding type 0: record was never finalised"),
            InvalidSchemaVersion { have } =>
                write!(f, "invalid schema version: {}", have),
            TotalSizeTooSmall { have, min } =>
                write!(f, "total size too small: {} < {}", have, min),
            AttributeOffsetOutOfRange { attr_offset, total_size } =>
                write!(f, "attribute offset {} out of range for total size {}", attr_offset, total_size),
        }
    }
}

impl std::error::Error for HeaderError {}
