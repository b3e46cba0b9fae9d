//! codecs/none.rs
//! Pass-through codec.

use crate::compression::types::{check_size, CompressionCodec, CompressionError, Compressor};

pub struct NoneCompressor;

impl Compressor for NoneCompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::None
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(input.to_vec())
    }

    fn decompress(&self, input: &[u8], expected_raw_size: usize) -> Result<Vec<u8>, CompressionError> {
        check_size("none", expected_raw_size, input.to_vec())
    }
}
