use byteorder::{ByteOrder, LittleEndian};

use crate::buffer::types::{check_range, BufferError};

/// Read-only, bounds-checked view over encoded bytes.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
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
    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], BufferError> {
        let end = check_range(offset, len, self.bytes.len())?;
        Ok(&self.bytes[offset..end])
    }

    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, BufferError> {
        Ok(self.slice(offset, 1)?[0])
    }

    #[inline]
    pub fn read_u32(&self, offset: usize) -> Result<u32, BufferError> {
        Ok(LittleEndian::read_u32(self.slice(offset, 4)?))
    }

    #[inline]
    pub fn read_i32(&self, offset: usize) -> Result<i32, BufferError> {
        Ok(LittleEndian::read_i32(self.slice(offset, 4)?))
    }

    #[inline]
    pub fn read_u64(&self, offset: usize) -> Result<u64, BufferError> {
        Ok(LittleEndian::read_u64(self.slice(offset, 8)?))
    }

    /// Copy out a fixed-size array (slots, headers).
    #[inline]
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], BufferError> {
        let mut dst = [0u8; N];
        dst.copy_from_slice(self.slice(offset, N)?);
        Ok(dst)
    }
}
