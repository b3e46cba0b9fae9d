//! record/attributes.rs
//! Trailing string-keyed attribute section.
//!
//! ```text
//! [ count (4) ] { [ key_len (4) ][ key ][ val_len (4) ][ val ] } * count
//! ```
//!
//! Starts at the header's `attr_offset` and ends exactly at `total_size`.
//! Pair order is whatever the producer wrote; readers treat it as a map.

use std::collections::BTreeMap;
use log::trace;

use crate::buffer::{ByteBuf, ByteView};
use crate::constants::{ATTRIBUTE_COUNT_LEN, ATTRIBUTE_LEN_PREFIX};
use crate::types::{RecordError, RecordResult};
use crate::utils::fmt_bytes;

pub type Attributes = BTreeMap<String, String>;

/// Encoded size of the section, count prefix included.
pub fn attribute_section_len(attrs: &Attributes) -> usize {
    ATTRIBUTE_COUNT_LEN
        + attrs
            .iter()
            .map(|(k, v)| 2 * ATTRIBUTE_LEN_PREFIX + k.len() + v.len())
            .sum::<usize>()
}

/// Append the attribute section to the end of `buf`.
pub fn encode_attributes(buf: &mut ByteBuf, attrs: &Attributes) -> RecordResult<()> {
    let count = u32::try_from(attrs.len())
        .map_err(|_| RecordError::AttributeParseError(format!("too many attributes: {}", attrs.len())))?;
    buf.append_u32(count);

    for (key, value) in attrs {
        for part in [key, value] {
            let len = u32::try_from(part.len()).map_err(|_| {
                RecordError::AttributeParseError(format!("attribute of {} bytes", part.len()))
            })?;
            buf.append_u32(len);
            buf.append(part.as_bytes());
        }
    }
    Ok(())
}

/// Parse the attribute section in `[attr_offset, total_size)`.
///
/// `record` must already be truncated to `total_size`; any length that would
/// read past its end is an `AttributeParseError`.
pub fn parse_attributes(record: &[u8], attr_offset: usize) -> RecordResult<Attributes> {
    let view = ByteView::new(record);
    let end = view.len();
    let mut pos = attr_offset;

    let count = view
        .read_u32(pos)
        .map_err(|e| RecordError::AttributeParseError(format!("attribute count: {}", e)))? as usize;
    pos += ATTRIBUTE_COUNT_LEN;

    // Each pair needs at least its two length prefixes.
    let remaining = end.saturating_sub(pos);
    if count > remaining / (2 * ATTRIBUTE_LEN_PREFIX) {
        return Err(RecordError::AttributeParseError(format!(
            "count {} cannot fit in {} remaining bytes", count, remaining
        )));
    }

    let mut attrs = Attributes::new();
    for i in 0..count {
        let key = read_part(&view, &mut pos, i, "key")?;
        let value = read_part(&view, &mut pos, i, "value")?;
        attrs.insert(key, value);
    }

    if pos != end {
        return Err(RecordError::AttributeParseError(format!(
            "{} trailing bytes after {} attributes", end - pos, count
        )));
    }

    trace!("parsed {} attributes", attrs.len());
    Ok(attrs)
}

fn read_part(view: &ByteView<'_>, pos: &mut usize, pair: usize, what: &str) -> RecordResult<String> {
    let len = view
        .read_u32(*pos)
        .map_err(|e| RecordError::AttributeParseError(format!("pair {} {} length: {}", pair, what, e)))?
        as usize;
    *pos += ATTRIBUTE_LEN_PREFIX;

    let raw = view
        .slice(*pos, len)
        .map_err(|e| RecordError::AttributeParseError(format!("pair {} {}: {}", pair, what, e)))?;
    *pos += len;

    std::str::from_utf8(raw).map(str::to_owned).map_err(|_| {
        RecordError::AttributeParseError(format!("pair {} {} is not UTF-8: {}", pair, what, fmt_bytes(raw)))
    })
}
