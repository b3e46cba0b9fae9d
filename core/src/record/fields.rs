//! record/fields.rs
//! Per-field slot codec.
//!
//! Fixed-width values are widened to a u64 (integers sign-extended, floats by
//! bit pattern) and stored little-endian in the field's 8-byte slot. Strings,
//! decimals and blob bytes go through the inline/spill writer. Presence is
//! tracked in the null bitmap; an absent field never touches its slot.

use std::ops::Range;
use bytes::Bytes;
use log::trace;

use crate::buffer::{ByteBuf, ByteView};
use crate::layout::{self, RecordLayout};
use crate::record::spill::{read_string, write_string, StringPlacement};
use crate::schema::{Decimal, FieldType, FieldValue};
use crate::types::{RecordError, RecordResult};

/// Blob records declare no type; their single field is raw bytes.
pub(crate) const BLOB_TYPE_NAME: &str = "BYTES";

fn check_index(layout: &RecordLayout, index: usize) -> RecordResult<()> {
    if !layout.contains(index) {
        return Err(RecordError::FieldIndexOutOfRange { index, field_count: layout.field_count() });
    }
    Ok(())
}

fn check_type(index: usize, declared: Option<FieldType>, value: &FieldValue) -> RecordResult<()> {
    match (declared, value.field_type()) {
        (Some(d), Some(v)) if d == v => Ok(()),
        (None, None) => Ok(()),
        (Some(d), _) => Err(RecordError::type_mismatch(index, d, value.type_name())),
        (None, Some(_)) => Err(RecordError::FieldTypeMismatch {
            index,
            expected: BLOB_TYPE_NAME,
            actual: value.type_name(),
        }),
    }
}

/// Encode `value` into field `index`.
///
/// Returns the string placement for variable-length values so callers can
/// keep inline/spill counts.
pub fn encode_field(
    buf: &mut ByteBuf,
    layout: &RecordLayout,
    declared: Option<FieldType>,
    index: usize,
    value: &FieldValue,
) -> RecordResult<Option<StringPlacement>> {
    check_index(layout, index)?;
    check_type(index, declared, value)?;

    let slot = layout.slot_offset(index);
    let placement = match value {
        FieldValue::Boolean(v)   => { buf.write_u64_at(slot, *v as u64)?; None }
        FieldValue::TinyInt(v)   => { buf.write_u64_at(slot, *v as i64 as u64)?; None }
        FieldValue::SmallInt(v)  => { buf.write_u64_at(slot, *v as i64 as u64)?; None }
        FieldValue::Integer(v)   => { buf.write_u64_at(slot, *v as i64 as u64)?; None }
        FieldValue::BigInt(v)    => { buf.write_u64_at(slot, *v as u64)?; None }
        FieldValue::Timestamp(v) => { buf.write_u64_at(slot, *v as u64)?; None }
        FieldValue::Float(v)     => { buf.write_u64_at(slot, v.to_bits() as u64)?; None }
        FieldValue::Double(v)    => { buf.write_u64_at(slot, v.to_bits())?; None }
        FieldValue::Decimal(d)   => Some(write_string(buf, slot, d.as_str().as_bytes())?),
        FieldValue::String(s)    => Some(write_string(buf, slot, s.as_bytes())?),
        FieldValue::Bytes(b)     => Some(write_string(buf, slot, b)?),
    };

    layout::set_present(buf, index)?;
    Ok(placement)
}

/// Clear field `index` back to absent.
pub fn clear_field(buf: &mut ByteBuf, layout: &RecordLayout, index: usize) -> RecordResult<()> {
    check_index(layout, index)?;
    layout::clear_present(buf, index)?;
    Ok(())
}

/// Decoding context shared by every field of one record.
#[derive(Debug, Clone)]
pub struct FieldDecoder<'a> {
    pub bytes: &'a Bytes,
    pub layout: &'a RecordLayout,
    /// Spilled strings must fall inside this range.
    pub spill_range: Range<usize>,
    pub strict_utf8: bool,
}

impl<'a> FieldDecoder<'a> {
    pub fn is_present(&self, index: usize) -> RecordResult<bool> {
        check_index(self.layout, index)?;
        Ok(layout::is_present(&ByteView::new(self.bytes), index)?)
    }

    /// Decode field `index` as `declared` (`None` for a blob field).
    /// Absent fields decode to `Ok(None)` without reading the slot.
    pub fn decode(&self, declared: Option<FieldType>, index: usize) -> RecordResult<Option<FieldValue>> {
        if !self.is_present(index)? {
            return Ok(None);
        }

        let view = ByteView::new(self.bytes);
        let slot = self.layout.slot_offset(index);
        trace!("decoding field {} as {:?}", index, declared);

        let value = match declared {
            Some(FieldType::Boolean)   => FieldValue::Boolean(view.read_u64(slot)? != 0),
            Some(FieldType::TinyInt)   => FieldValue::TinyInt(view.read_u64(slot)? as i64 as i8),
            Some(FieldType::SmallInt)  => FieldValue::SmallInt(view.read_u64(slot)? as i64 as i16),
            Some(FieldType::Integer)   => FieldValue::Integer(view.read_u64(slot)? as i64 as i32),
            Some(FieldType::BigInt)    => FieldValue::BigInt(view.read_u64(slot)? as i64),
            Some(FieldType::Timestamp) => FieldValue::Timestamp(view.read_u64(slot)? as i64),
            Some(FieldType::Float)     => FieldValue::Float(f32::from_bits(view.read_u64(slot)? as u32)),
            Some(FieldType::Double)    => FieldValue::Double(f64::from_bits(view.read_u64(slot)?)),
            Some(FieldType::Decimal)   => {
                let s = self.read_utf8(&view, slot, index)?;
                FieldValue::Decimal(s.parse::<Decimal>()?)
            }
            Some(FieldType::String)    => FieldValue::String(self.read_utf8(&view, slot, index)?),
            None => {
                let range = read_string(&view, slot, self.spill_range.clone())?;
                FieldValue::Bytes(self.bytes.slice(range))
            }
        };

        Ok(Some(value))
    }

    fn read_utf8(&self, view: &ByteView<'_>, slot: usize, index: usize) -> RecordResult<String> {
        let range = read_string(view, slot, self.spill_range.clone())?;
        let raw = &self.bytes[range];
        if self.strict_utf8 {
            std::str::from_utf8(raw)
                .map(str::to_owned)
                .map_err(|_| RecordError::InvalidUtf8 { index })
        } else {
            Ok(String::from_utf8_lossy(raw).into_owned())
        }
    }
}
