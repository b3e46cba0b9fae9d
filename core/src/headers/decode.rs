//! headers/decode.rs
//!
//! Header decoding utilities.
//!
//! Design notes:
//! - Reads the first 16 bytes of a record; anything after is left untouched.
//! - `decode_header_le` only parses; `peek_header` also validates.

use byteorder::{ByteOrder, LittleEndian};

use crate::headers::types::{HeaderError, RecordHeader, HEADER_LEN};

/// Deserialize a 16-byte little-endian header.
#[inline]
pub fn decode_header_le(buf: &[u8]) -> Result<RecordHeader, HeaderError> {
    if buf.len() < HEADER_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HEADER_LEN });
    }

    Ok(RecordHeader {
        encoding_type:  LittleEndian::read_u32(&buf[0..4]),    // 0..4   encoding type
        schema_version: LittleEndian::read_i32(&buf[4..8]),    // 4..8   schema version
        total_size:     LittleEndian::read_u32(&buf[8..12]),   // 8..12  total size
        attr_offset:    LittleEndian::read_u32(&buf[12..16]),  // 12..16 attribute offset
    })
}

/// Decode and validate the header at the start of `buf`.
pub fn peek_header(buf: &[u8]) -> Result<RecordHeader, HeaderError> {
    let h = decode_header_le(buf)?;
    h.validate()?;
    Ok(h)
}
