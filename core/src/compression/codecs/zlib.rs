//! codecs/zlib.rs
//! Deflate with the zlib wrapper (header + adler32) via flate2.

use std::io::{Read, Write};
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::compression::types::{check_size, CompressionCodec, CompressionError, Compressor};

pub struct ZlibCompressor {
    level: Compression,
}

impl ZlibCompressor {
    pub fn new(level: u32) -> Self {
        let level = match level {
            0..=9 => Compression::new(level),
            _ => Compression::default(),
        };
        Self { level }
    }
}

fn failed(e: std::io::Error) -> CompressionError {
    CompressionError::CodecProcessFailed { codec: "zlib", msg: e.to_string() }
}

impl Compressor for ZlibCompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Zlib
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut enc = ZlibEncoder::new(Vec::with_capacity(input.len() / 2), self.level);
        enc.write_all(input).map_err(failed)?;
        enc.finish().map_err(failed)
    }

    fn decompress(&self, input: &[u8], expected_raw_size: usize) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::with_capacity(expected_raw_size);
        ZlibDecoder::new(input)
            .take(expected_raw_size as u64 + 1)
            .read_to_end(&mut out)
            .map_err(failed)?;
        check_size("zlib", expected_raw_size, out)
    }
}
