use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

use crate::buffer::types::{check_range, BufferError};
use crate::utils::align_up;

/// Growable, zero-initialised write buffer.
///
/// Fixed regions are written in place with `write_*_at`; variable data is
/// appended with `append_aligned`, which pads each entry to 8 bytes.
#[derive(Debug, Clone, Default)]
pub struct ByteBuf {
    bytes: Vec<u8>,
}

impl ByteBuf {
    /// Allocate `len` zeroed bytes.
    pub fn zeroed(len: usize) -> Self {
        Self { bytes: vec![0u8; len] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn write_at(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError> {
        let end = check_range(offset, src.len(), self.bytes.len())?;
        self.bytes[offset..end].copy_from_slice(src);
        Ok(())
    }

    #[inline]
    pub fn write_u32_at(&mut self, offset: usize, v: u32) -> Result<(), BufferError> {
        let end = check_range(offset, 4, self.bytes.len())?;
        LittleEndian::write_u32(&mut self.bytes[offset..end], v);
        Ok(())
    }

    #[inline]
    pub fn write_i32_at(&mut self, offset: usize, v: i32) -> Result<(), BufferError> {
        let end = check_range(offset, 4, self.bytes.len())?;
        LittleEndian::write_i32(&mut self.bytes[offset..end], v);
        Ok(())
    }

    #[inline]
    pub fn write_u64_at(&mut self, offset: usize, v: u64) -> Result<(), BufferError> {
        let end = check_range(offset, 8, self.bytes.len())?;
        LittleEndian::write_u64(&mut self.bytes[offset..end], v);
        Ok(())
    }

    /// OR `mask` into the byte at `offset`.
    #[inline]
    pub fn or_u8_at(&mut self, offset: usize, mask: u8) -> Result<(), BufferError> {
        check_range(offset, 1, self.bytes.len())?;
        self.bytes[offset] |= mask;
        Ok(())
    }

    /// AND `mask` into the byte at `offset`.
    #[inline]
    pub fn and_u8_at(&mut self, offset: usize, mask: u8) -> Result<(), BufferError> {
        check_range(offset, 1, self.bytes.len())?;
        self.bytes[offset] &= mask;
        Ok(())
    }

    /// Append `src` at the end, zero-padded to the next 8-byte boundary.
    /// Returns the offset the entry starts at.
    pub fn append_aligned(&mut self, src: &[u8]) -> usize {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(src);
        self.bytes.resize(start + align_up(src.len()), 0);
        start
    }

    /// Append raw bytes without padding (attribute section).
    pub fn append(&mut self, src: &[u8]) {
        self.bytes.extend_from_slice(src);
    }

    #[inline]
    pub fn append_u32(&mut self, v: u32) {
        let mut tmp = [0u8; 4];
        LittleEndian::write_u32(&mut tmp, v);
        self.bytes.extend_from_slice(&tmp);
    }

    pub fn freeze(self) -> Bytes {
        Bytes::from(self.bytes)
    }
}
