//! buffer/mod.rs
//! Bounds-checked byte access for the record wire format.
//!
//! Design notes:
//! - Every read and write names an absolute offset and a length; both are
//!   checked against the buffer before any byte is touched.
//! - Out-of-range access becomes a `BufferError`, never a panic.
//! - All multi-byte integers are little-endian.

pub mod types;
pub mod view;
pub mod buf;

pub use types::BufferError;
pub use view::ByteView;
pub use buf::ByteBuf;
