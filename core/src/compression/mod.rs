//! compression/mod.rs
//! Batch compressors applied above the record codec.
//!
//! Notes:
//! - The codec never compresses on its own; encoded records are plain input here.
//! - Every codec is one-shot: `compress` a whole buffer, `decompress` back to a
//!   caller-declared raw size. A size disagreement is an error, not truncation.
//! - Registry resolves codec IDs to implementations.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
