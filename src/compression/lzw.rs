//! Handler for TIFF LZW compressed data
//!
//! Codes are packed MSB-first and the code width switches one code early,
//! which is the TIFF flavour of LZW.

use weezl::decode::Decoder;
use weezl::BitOrder;

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// LZW handler (compression code 5)
pub struct LzwHandler;

impl CompressionHandler for LzwHandler {
    fn decompress(&self, data: &[u8], expected_len: usize) -> TiffResult<Vec<u8>> {
        let mut out = Vec::with_capacity(expected_len);
        let mut decoder = Decoder::with_tiff_size_switch(BitOrder::Msb, 8);

        let result = decoder.into_vec(&mut out).decode(data);
        result
            .status
            .map_err(|e| TiffError::GenericError(format!("LZW decoding failed: {}", e)))?;

        Ok(out)
    }

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn code(&self) -> u16 {
        compression::LZW
    }
}
