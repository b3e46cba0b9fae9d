/// Fixed record header length: encoding type, schema version, total size, attribute offset.
pub const RECORD_HEADER_LEN: usize = 16;

/// Field-count prefix written right after the header.
pub const FIELD_COUNT_LEN: usize = 4;

/// One slot per field in the fixed slot table.
pub const SLOT_LEN: usize = 8;

/// Spill entries and the bitmap region are padded to this boundary.
pub const ALIGNMENT: usize = 8;

/// Strings shorter than this are stored inside their slot.
pub const INLINE_STRING_LIMIT: usize = 7;

/// High bit of the last slot byte marks an inline string.
pub const INLINE_TAG: u8 = 0x80;

/// Low bits of the last slot byte carry the inline length.
pub const INLINE_LEN_MASK: u8 = 0x07;

/// Schema version written for schemaless (blob) records.
pub const SCHEMALESS_VERSION: i32 = -1;

/// Blob records carry exactly one raw-bytes field.
pub const BLOB_FIELD_COUNT: usize = 1;

/// Attribute count prefix length.
pub const ATTRIBUTE_COUNT_LEN: usize = 4;

/// Attribute key/value length prefix.
pub const ATTRIBUTE_LEN_PREFIX: usize = 4;

/// Defaults when the config does not say otherwise.
pub const DEFAULT_MAX_RECORD_SIZE: usize = 16 * 1024 * 1024; // 16 MiB

/// Hard ceiling: sizes and offsets travel as u32 on the wire.
pub const MAX_RECORD_SIZE: usize = u32::MAX as usize;

/// Encoding type identifiers (mirrored in the record header).
pub mod encoding_ids {
    /// Reserved for a header synthesised before the record is finalised.
    pub const RESERVED: u32 = 0x0000_0000;
    pub const BINARY: u32 = 0x0000_0001;
}
