//! codecs/lz4.rs
//! LZ4 block codec (no size prefix; the caller carries the raw size).
use lz4_flex::block::{compress, decompress};

use crate::compression::types::{check_size, CompressionCodec, CompressionError, Compressor};

pub struct Lz4Compressor;

impl Compressor for Lz4Compressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Lz4
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(compress(input))
    }

    fn decompress(&self, input: &[u8], expected_raw_size: usize) -> Result<Vec<u8>, CompressionError> {
        let out = decompress(input, expected_raw_size)
            .map_err(|e| CompressionError::CodecProcessFailed {
                codec: "lz4",
                msg: e.to_string(),
            })?;
        check_size("lz4", expected_raw_size, out)
    }
}
