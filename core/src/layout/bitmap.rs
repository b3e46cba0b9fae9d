//! layout/bitmap.rs
//! Null-presence bitmap.
//!
//! A set bit means the field carries a value; a clear bit means absent.
//! Buffers start zeroed, so every field is absent until written. Bits are
//! addressed per byte (`index >> 3`, bit `index & 7`) even though the region
//! itself is padded to 64-bit words.

use crate::buffer::{BufferError, ByteBuf, ByteView};
use crate::layout::types::RecordLayout;

/// Mark field `index` as present.
#[inline]
pub fn set_present(buf: &mut ByteBuf, index: usize) -> Result<(), BufferError> {
    let (byte, mask) = RecordLayout::bitmap_position(index);
    buf.or_u8_at(byte, mask)
}

/// Mark field `index` as absent again.
#[inline]
pub fn clear_present(buf: &mut ByteBuf, index: usize) -> Result<(), BufferError> {
    let (byte, mask) = RecordLayout::bitmap_position(index);
    buf.and_u8_at(byte, !mask)
}

/// Whether field `index` carries a value.
#[inline]
pub fn is_present(view: &ByteView<'_>, index: usize) -> Result<bool, BufferError> {
    let (byte, mask) = RecordLayout::bitmap_position(index);
    Ok(view.read_u8(byte)? & mask != 0)
}
