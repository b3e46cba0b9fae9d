use crate::constants::{FIELD_COUNT_LEN, RECORD_HEADER_LEN, SLOT_LEN};

/// Offsets and sizes derived from a field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    field_count: usize,
    bitmap_len: usize,
    fixed_header_len: usize,
}

impl RecordLayout {
    /// Offset of the field-count prefix.
    pub const FIELD_COUNT_OFFSET: usize = RECORD_HEADER_LEN;

    /// Offset of the first null-bitmap byte.
    pub const BITMAP_OFFSET: usize = RECORD_HEADER_LEN + FIELD_COUNT_LEN;

    pub const fn new(field_count: usize) -> Self {
        let bitmap_len = Self::bitmap_region_len(field_count);
        Self {
            field_count,
            bitmap_len,
            fixed_header_len: RECORD_HEADER_LEN + FIELD_COUNT_LEN + bitmap_len,
        }
    }

    /// Bitmap region, rounded up to whole 64-bit words.
    #[inline]
    pub const fn bitmap_region_len(field_count: usize) -> usize {
        ((field_count + 63) >> 6) << 3
    }

    #[inline]
    pub const fn field_count(&self) -> usize {
        self.field_count
    }

    #[inline]
    pub const fn bitmap_len(&self) -> usize {
        self.bitmap_len
    }

    /// Header + field-count prefix + bitmap region.
    #[inline]
    pub const fn fixed_header_len(&self) -> usize {
        self.fixed_header_len
    }

    #[inline]
    pub const fn slot_table_len(&self) -> usize {
        self.field_count * SLOT_LEN
    }

    /// Smallest buffer that holds every fixed region; also where the spill region starts.
    #[inline]
    pub const fn min_allocation(&self) -> usize {
        self.fixed_header_len + self.slot_table_len()
    }

    #[inline]
    pub const fn slot_offset(&self, index: usize) -> usize {
        self.fixed_header_len + SLOT_LEN * index
    }

    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index < self.field_count
    }

    /// Byte holding the presence bit of field `index`, and the bit mask within it.
    #[inline]
    pub const fn bitmap_position(index: usize) -> (usize, u8) {
        (Self::BITMAP_OFFSET + (index >> 3), 1u8 << (index & 7))
    }
}
