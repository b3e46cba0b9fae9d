//! headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Serializes `RecordHeader` into a fixed 16-byte buffer in little-endian order.
//! - Field order must match `decode.rs` exactly.

use byteorder::{ByteOrder, LittleEndian};

use crate::headers::types::{RecordHeader, HEADER_LEN};

/// Serialize a `RecordHeader` into a 16-byte buffer in little-endian order.
#[inline]
pub fn encode_header_le(h: &RecordHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];

    LittleEndian::write_u32(&mut out[0..4], h.encoding_type);    // 0..4   encoding type
    LittleEndian::write_i32(&mut out[4..8], h.schema_version);   // 4..8   schema version
    LittleEndian::write_u32(&mut out[8..12], h.total_size);      // 8..12  total size
    LittleEndian::write_u32(&mut out[12..16], h.attr_offset);    // 12..16 attribute offset

    out
}
