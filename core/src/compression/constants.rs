/// Stable codec IDs (u16) used by the batch layer.
pub mod codec_ids {
    pub const NONE: u16    = 0x0000;
    pub const LZ4: u16     = 0x0001;
    pub const DEFLATE: u16 = 0x0002;
    pub const ZLIB: u16    = 0x0003;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;
pub const DEFAULT_LEVEL_ZLIB: u32 = 6;
