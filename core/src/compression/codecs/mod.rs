//! compression/codecs/mod.rs
//! One file per codec; each implements `Compressor`.

pub mod none;
pub mod lz4;
pub mod deflate;
pub mod zlib;

pub use none::*;
pub use lz4::*;
pub use deflate::*;
pub use zlib::*;
