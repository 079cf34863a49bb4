//! Handler for Deflate compressed data

use std::io::Read;
use flate2::read::ZlibDecoder;
use crate::tiff::constants::compression;
use crate::tiff::errors::TiffResult;
use super::handler::CompressionHandler;

/// Deflate (zlib stream) handler, for both code 8 and the legacy code 32946
pub struct AdobeDeflateHandler {
    code: u16,
}

impl AdobeDeflateHandler {
    pub fn new(code: u16) -> Self {
        AdobeDeflateHandler { code }
    }
}

impl Default for AdobeDeflateHandler {
    fn default() -> Self {
        Self::new(compression::DEFLATE)
    }
}

impl CompressionHandler for AdobeDeflateHandler {
    fn decompress(&self, data: &[u8], expected_len: usize) -> TiffResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed_data = Vec::with_capacity(expected_len);
        decoder.read_to_end(&mut decompressed_data)?;
        Ok(decompressed_data)
    }

    fn name(&self) -> &'static str {
        "Adobe Deflate"
    }

    fn code(&self) -> u16 {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_decompress_zlib_block() {
        let raw: Vec<u8> = (0..200u16).flat_map(|v| v.to_le_bytes()).collect();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw).unwrap();
        let compressed = encoder.finish().unwrap();

        let handler = AdobeDeflateHandler::default();
        assert_eq!(handler.decompress(&compressed, raw.len()).unwrap(), raw);
    }

    #[test]
    fn test_corrupt_stream_is_error() {
        let handler = AdobeDeflateHandler::new(compression::ADOBE_DEFLATE_OLD);
        assert!(handler.decompress(&[1, 2, 3, 4], 16).is_err());
        assert_eq!(handler.code(), 32946);
    }
}
