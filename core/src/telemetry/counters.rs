//! telemetry/counters.rs
//! Mutable counters collected while encoding and decoding records.
use std::ops::AddAssign;
use serde::{Deserialize, Serialize};

use crate::record::WriterStats;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounters {
    pub records_encoded: u64,
    pub records_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub inline_strings: u64,
    pub spilled_strings: u64,
    pub spill_bytes: u64,
    pub attributes_encoded: u64,
    /// Raw and compressed sizes of batches passed through a compressor.
    pub bytes_raw: u64,
    pub bytes_compressed: u64,
}

impl CodecCounters {
    /// Record one encoded record of `total_size` bytes.
    pub fn add_encoded(&mut self, stats: &WriterStats, total_size: usize) {
        self.records_encoded += 1;
        self.bytes_encoded += total_size as u64;
        self.inline_strings += stats.inline_strings;
        self.spilled_strings += stats.spilled_strings;
        self.spill_bytes += stats.spill_bytes;
        self.attributes_encoded += stats.attributes;
    }

    pub fn add_decoded(&mut self, total_size: usize) {
        self.records_decoded += 1;
        self.bytes_decoded += total_size as u64;
    }

    pub fn add_compressed(&mut self, raw: usize, compressed: usize) {
        self.bytes_raw += raw as u64;
        self.bytes_compressed += compressed as u64;
    }

    /// `compressed / raw`, or 0.0 when nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_raw == 0 {
            return 0.0;
        }
        self.bytes_compressed as f64 / self.bytes_raw as f64
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.records_encoded += other.records_encoded;
        self.records_decoded += other.records_decoded;
        self.bytes_encoded += other.bytes_encoded;
        self.bytes_decoded += other.bytes_decoded;
        self.inline_strings += other.inline_strings;
        self.spilled_strings += other.spilled_strings;
        self.spill_bytes += other.spill_bytes;
        self.attributes_encoded += other.attributes_encoded;
        self.bytes_raw += other.bytes_raw;
        self.bytes_compressed += other.bytes_compressed;
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
