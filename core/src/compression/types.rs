//! compression/types.rs
//! Stable codec IDs plus the compressor contract.
use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::compression::constants::codec_ids;
use crate::utils::enum_name_or_hex;

#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionCodec {
    None    = codec_ids::NONE,
    Lz4     = codec_ids::LZ4,
    Deflate = codec_ids::DEFLATE,
    Zlib    = codec_ids::ZLIB,
}

impl CompressionCodec {
    pub fn verify(raw: u16) -> Result<Self, CompressionError> {
        CompressionCodec::try_from(raw).map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }

    pub const fn name(self) -> &'static str {
        match self {
            CompressionCodec::None    => "none",
            CompressionCodec::Lz4     => "lz4",
            CompressionCodec::Deflate => "deflate",
            CompressionCodec::Zlib    => "zlib",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    UnsupportedCodec { codec_id: u16 },
    CodecProcessFailed { codec: &'static str, msg: String },
    SizeMismatch { codec: &'static str, expected: usize, actual: usize },
    ChecksumMismatch { expected: u32, actual: u32 },
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            UnsupportedCodec { codec_id } =>
                write!(f, "unsupported compression codec: {}",
                       enum_name_or_hex::<CompressionCodec>(*codec_id)),
            CodecProcessFailed { codec, msg } =>
                write!(f, "codec {} process failed: {}", codec, msg),
            SizeMismatch { codec, expected, actual } =>
                write!(f, "codec {} produced {} bytes, expected {}", codec, actual, expected),
            ChecksumMismatch { expected, actual } =>
                write!(f, "checksum mismatch: expected {:08x}, got {:08x}", expected, actual),
        }
    }
}

impl std::error::Error for CompressionError {}

/// One-shot compressor. Shared across threads; holds no per-call state.
pub trait Compressor: Send + Sync {
    fn codec(&self) -> CompressionCodec;

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Decompress `input`, which must expand to exactly `expected_raw_size` bytes.
    fn decompress(&self, input: &[u8], expected_raw_size: usize) -> Result<Vec<u8>, CompressionError>;
}

pub(crate) fn check_size(codec: &'static str, expected: usize, out: Vec<u8>) -> Result<Vec<u8>, CompressionError> {
    if out.len() != expected {
        return Err(CompressionError::SizeMismatch { codec, expected, actual: out.len() });
    }
    Ok(out)
}
