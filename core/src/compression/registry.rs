//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::codecs::{deflate, lz4, none, zlib};
use crate::compression::constants::{DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_ZLIB};
use crate::compression::types::{CompressionCodec, CompressionError, Compressor};

pub struct CodecInfo {
    pub name: &'static str,
    pub default_level: u32,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    let codec = CompressionCodec::verify(codec_id)?;
    let default_level = match codec {
        CompressionCodec::Deflate => DEFAULT_LEVEL_DEFLATE,
        CompressionCodec::Zlib => DEFAULT_LEVEL_ZLIB,
        CompressionCodec::None | CompressionCodec::Lz4 => 0,
    };
    Ok(CodecInfo { name: codec.name(), default_level })
}

pub fn create_compressor(codec: CompressionCodec, level: Option<u32>) -> Box<dyn Compressor> {
    match codec {
        CompressionCodec::None => Box::new(none::NoneCompressor),
        CompressionCodec::Lz4 => Box::new(lz4::Lz4Compressor),
        CompressionCodec::Deflate => Box::new(deflate::DeflateCompressor::new(level.unwrap_or(DEFAULT_LEVEL_DEFLATE))),
        CompressionCodec::Zlib => Box::new(zlib::ZlibCompressor::new(level.unwrap_or(DEFAULT_LEVEL_ZLIB))),
    }
}

/// Factory keyed by the raw wire id.
pub fn create_compressor_by_id(codec_id: u16, level: Option<u32>) -> Result<Box<dyn Compressor>, CompressionError> {
    Ok(create_compressor(CompressionCodec::verify(codec_id)?, level))
}
