//! record/spill.rs
//! Inline-or-spill string encoding for variable-length fields.
//!
//! ```text
//! inline (len < 7):  [ b0 .. b(len-1) | zero pad .. byte 6 | 0x80 | len ]
//! spilled (len >= 7): u64 LE = (spill_offset << 32) | len
//! ```
//!
//! `spill_offset` is relative to the end of the 16-byte header. Spilled bytes
//! are appended to the spill region and padded to the next 8-byte boundary.

use std::ops::Range;
use log::trace;

use crate::buffer::{ByteBuf, ByteView};
use crate::constants::{INLINE_LEN_MASK, INLINE_STRING_LIMIT, INLINE_TAG, RECORD_HEADER_LEN, SLOT_LEN};
use crate::types::{RecordError, RecordResult};

/// Spill offsets share the slot's top byte with the inline tag, so they stay below 2^31.
const MAX_SPILL_OFFSET: usize = 0x7FFF_FFFF;

/// Where a string ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringPlacement {
    Inline { len: usize },
    Spilled { offset: usize, len: usize },
}

/// Write `bytes` for the slot at `slot_offset`, spilling when it does not fit inline.
pub fn write_string(buf: &mut ByteBuf, slot_offset: usize, bytes: &[u8]) -> RecordResult<StringPlacement> {
    let len = bytes.len();

    if len < INLINE_STRING_LIMIT {
        let mut slot = [0u8; SLOT_LEN];
        slot[..len].copy_from_slice(bytes);
        slot[SLOT_LEN - 1] = INLINE_TAG | len as u8;
        buf.write_at(slot_offset, &slot)?;
        return Ok(StringPlacement::Inline { len });
    }

    // The spill region is the tail of the buffer; its end is the next write position.
    let relative = buf.len() - RECORD_HEADER_LEN;
    if relative > MAX_SPILL_OFFSET || len > u32::MAX as usize {
        return Err(RecordError::RecordTooLarge {
            size: buf.len().saturating_add(len),
            max: MAX_SPILL_OFFSET + RECORD_HEADER_LEN,
        });
    }

    let start = buf.append_aligned(bytes);
    debug_assert_eq!(start - RECORD_HEADER_LEN, relative);

    let packed = ((relative as u64) << 32) | len as u64;
    buf.write_u64_at(slot_offset, packed)?;

    trace!("spilled {} bytes at relative offset {}", len, relative);
    Ok(StringPlacement::Spilled { offset: start, len })
}

/// Locate the bytes of the string in the slot at `slot_offset`.
///
/// `spill_range` bounds where spilled bytes may live: from the end of the
/// slot table up to the attribute section.
pub fn read_string(view: &ByteView<'_>, slot_offset: usize, spill_range: Range<usize>) -> RecordResult<Range<usize>> {
    let slot = view.read_array::<SLOT_LEN>(slot_offset)?;
    let tag = slot[SLOT_LEN - 1];

    if tag & INLINE_TAG != 0 {
        let len = (tag & INLINE_LEN_MASK) as usize;
        if len >= INLINE_STRING_LIMIT {
            return Err(RecordError::Corrupt(format!(
                "inline string length {} at slot {}", len, slot_offset
            )));
        }
        return Ok(slot_offset..slot_offset + len);
    }

    let packed = u64::from_le_bytes(slot);
    let len = (packed & 0xFFFF_FFFF) as usize;
    let start = RECORD_HEADER_LEN + (packed >> 32) as usize;
    let end = start.checked_add(len).ok_or_else(|| {
        RecordError::Corrupt(format!("spill range overflow at slot {}", slot_offset))
    })?;

    if start < spill_range.start || end > spill_range.end {
        return Err(RecordError::Corrupt(format!(
            "spilled string [{}..{}) outside spill region [{}..{})",
            start, end, spill_range.start, spill_range.end
        )));
    }

    Ok(start..end)
}
