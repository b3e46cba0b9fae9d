//! codecs/deflate.rs
//! Raw deflate (no zlib wrapper) via flate2.

use std::io::{Read, Write};
use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};

use crate::compression::types::{check_size, CompressionCodec, CompressionError, Compressor};

pub struct DeflateCompressor {
    level: Compression,
}

impl DeflateCompressor {
    pub fn new(level: u32) -> Self {
        let level = match level {
            0..=9 => Compression::new(level),
            _ => Compression::default(),
        };
        Self { level }
    }
}

fn failed(e: std::io::Error) -> CompressionError {
    CompressionError::CodecProcessFailed { codec: "deflate", msg: e.to_string() }
}

impl Compressor for DeflateCompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Deflate
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = DeflateEncoder::new(Vec::with_capacity(input.len() / 2), self.level);
        enc.write_all(input).map_err(failed)?;
        enc.finish().map_err(failed)
    }

    fn decompress(&self, input: &[u8], expected_raw_size: usize) -> Result<Vec<u8>, CompressionError> {
        // Read one byte past the expected size so oversized output is detected, not truncated.
        let mut out = Vec::with_capacity(expected_raw_size);
        DeflateDecoder::new(input)
            .take(expected_raw_size as u64 + 1)
            .read_to_end(&mut out)
            .map_err(failed)?;
        check_size("deflate", expected_raw_size, out)
    }
}
