//! config.rs
//! Codec configuration.
//!
//! Every field has a default, so a partial (or empty) JSON document is a
//! valid config: `{"max_record_size": 1048576}`.

use serde::{Deserialize, Serialize};

use crate::compression::CompressionCodec;
use crate::constants::{DEFAULT_MAX_RECORD_SIZE, MAX_RECORD_SIZE};
use crate::headers::RecordHeader;
use crate::types::{RecordError, RecordResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Records larger than this are rejected on encode and decode.
    pub max_record_size: usize,
    /// Reject invalid UTF-8 in string fields; when false, decode lossily.
    pub strict_utf8: bool,
    /// Codec used by the batch helpers.
    pub compression: CompressionCodec,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            strict_utf8: true,
            compression: CompressionCodec::Lz4,
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> RecordResult<Self> {
        let cfg: CodecConfig =
            serde_json::from_str(json).map_err(|e| RecordError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RecordResult<()> {
        if self.max_record_size < RecordHeader::MIN_TOTAL_SIZE {
            return Err(RecordError::Config(format!(
                "max_record_size {} below minimum record size {}",
                self.max_record_size,
                RecordHeader::MIN_TOTAL_SIZE
            )));
        }
        if self.max_record_size > MAX_RECORD_SIZE {
            return Err(RecordError::Config(format!(
                "max_record_size {} exceeds wire limit {}",
                self.max_record_size, MAX_RECORD_SIZE
            )));
        }
        Ok(())
    }
}
