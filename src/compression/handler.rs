//! Compression handler trait definition

use crate::tiff::errors::TiffResult;

/// Strategy trait for decoding one compressed strip or tile
pub trait CompressionHandler: Send + Sync {
    /// Decompress a block; `expected_len` is the size of the decoded block
    /// and may be used to pre-size buffers or stop early
    fn decompress(&self, data: &[u8], expected_len: usize) -> TiffResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Get the compression code
    fn code(&self) -> u16;
}
