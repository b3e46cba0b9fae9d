use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Access `[offset, offset + len)` falls outside a buffer of `have` bytes.
    OutOfBounds { offset: usize, len: usize, have: usize },

    /// Offset arithmetic overflowed `usize`.
    Overflow { offset: usize, len: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BufferError::*;
        match self {
            OutOfBounds { offset, len, have } =>
                write!(f, "access [{}..{}) out of bounds for {} bytes", offset, offset + len, have),
            Overflow { offset, len } =>
                write!(f, "offset overflow: {} + {}", offset, len),
        }
    }
}

impl std::error::Error for BufferError {}

/// Resolve `[offset, offset + len)` against `have` bytes.
#[inline]
pub(crate) fn check_range(offset: usize, len: usize, have: usize) -> Result<usize, BufferError> {
    let end = offset
        .checked_add(len)
        .ok_or(BufferError::Overflow { offset, len })?;
    if end > have {
        return Err(BufferError::OutOfBounds { offset, len, have });
    }
    Ok(end)
}
