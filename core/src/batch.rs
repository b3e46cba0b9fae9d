//! batch.rs
//! Multi-record helpers built only on each record's own byte count.
//!
//! Records are concatenated back to back; the `total_size` in every header is
//! the only delimiter. A batch can be handed to a compressor as one buffer,
//! with the raw size and a CRC32 kept alongside for the way back.

use bytes::{Bytes, BytesMut};
use log::debug;

use crate::compression::{create_compressor, CompressionCodec, CompressionError};
use crate::config::CodecConfig;
use crate::headers::peek_header;
use crate::record::encode::encode_with_stats;
use crate::record::{Record, RecordReader, RecordView};
use crate::telemetry::CodecCounters;
use crate::types::{RecordError, RecordResult};
use crate::utils::compute_checksum;

/// Concatenate already-encoded records.
pub fn concat_records(records: &[Bytes]) -> Bytes {
    let total = records.iter().map(Bytes::len).sum();
    let mut out = BytesMut::with_capacity(total);
    for r in records {
        out.extend_from_slice(r);
    }
    out.freeze()
}

/// Encode `records` back to back, counting as we go.
pub fn encode_records(records: &[Record], counters: &mut CodecCounters) -> RecordResult<Bytes> {
    encode_records_with(records, &CodecConfig::default(), counters)
}

/// Like `encode_records`, holding each record to `config.max_record_size`.
pub fn encode_records_with(records: &[Record], config: &CodecConfig, counters: &mut CodecCounters) -> RecordResult<Bytes> {
    let mut out = BytesMut::new();
    for record in records {
        let (bytes, stats) = encode_with_stats(record, config)?;
        counters.add_encoded(&stats, bytes.len());
        out.extend_from_slice(&bytes);
    }
    Ok(out.freeze())
}

/// Iterator over the records in a concatenated buffer. Stops after the first error.
#[derive(Debug, Clone)]
pub struct RecordIter {
    buf: Bytes,
    pos: usize,
    failed: bool,
}

pub fn split_records(buf: Bytes) -> RecordIter {
    RecordIter { buf, pos: 0, failed: false }
}

impl RecordIter {
    fn next_frame(&mut self) -> RecordResult<Bytes> {
        let rest = &self.buf[self.pos..];
        let header = peek_header(rest)?;
        let total = header.total_size as usize;
        if rest.len() < total {
            return Err(RecordError::InsufficientBufferLength { needed: total, available: rest.len() });
        }
        let frame = self.buf.slice(self.pos..self.pos + total);
        self.pos += total;
        Ok(frame)
    }
}

impl Iterator for RecordIter {
    type Item = RecordResult<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.buf.len() {
            return None;
        }
        let item = self.next_frame();
        self.failed = item.is_err();
        Some(item)
    }
}

/// Decode every record in a concatenated buffer.
pub fn read_records(reader: &RecordReader, buf: Bytes, counters: &mut CodecCounters) -> RecordResult<Vec<RecordView>> {
    split_records(buf)
        .map(|frame| -> RecordResult<RecordView> {
            let view = reader.read(&frame?)?;
            counters.add_decoded(view.total_size());
            Ok(view)
        })
        .collect()
}

/// Compressed batch plus what is needed to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedRecords {
    pub codec: CompressionCodec,
    pub raw_size: u32,
    /// CRC32 of the raw (uncompressed) bytes.
    pub crc32: u32,
    pub payload: Bytes,
}

pub fn compress_records(raw: &Bytes, codec: CompressionCodec, counters: &mut CodecCounters) -> RecordResult<CompressedRecords> {
    let raw_size = u32::try_from(raw.len())
        .map_err(|_| RecordError::RecordTooLarge { size: raw.len(), max: u32::MAX as usize })?;

    let payload = create_compressor(codec, None).compress(raw)?;
    counters.add_compressed(raw.len(), payload.len());
    debug!("compressed {} bytes to {} with {}", raw.len(), payload.len(), codec.name());

    Ok(CompressedRecords {
        codec,
        raw_size,
        crc32: compute_checksum(raw),
        payload: Bytes::from(payload),
    })
}

/// Compress with the codec named in `config`.
pub fn compress_records_with(raw: &Bytes, config: &CodecConfig, counters: &mut CodecCounters) -> RecordResult<CompressedRecords> {
    compress_records(raw, config.compression, counters)
}

/// Decompress and verify size and checksum; the result feeds `split_records`.
pub fn decompress_records(batch: &CompressedRecords) -> RecordResult<Bytes> {
    let raw = create_compressor(batch.codec, None).decompress(&batch.payload, batch.raw_size as usize)?;

    let actual = compute_checksum(&raw);
    if actual != batch.crc32 {
        return Err(CompressionError::ChecksumMismatch { expected: batch.crc32, actual }.into());
    }
    Ok(Bytes::from(raw))
}
