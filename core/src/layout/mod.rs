//! layout/mod.rs
//! Fixed-region geometry of an encoded record.
//!
//! ```text
//! [ header (16) ][ field_count (4) ][ null bitmap (8 * ceil(n / 64)) ]
//! [ slot table (8 * n) ][ spill region ... ][ attribute section ... ]
//! ```
//!
//! Pure arithmetic over the field count; no I/O and no error paths.

pub mod types;
pub mod bitmap;

pub use types::RecordLayout;
pub use bitmap::{clear_present, is_present, set_present};
