//! TIFF validation utilities
//!
//! Checks that keep a malformed or truncated raster from sending the reader
//! off the end of the file.

use log::{debug, error, warn};
use std::io::SeekFrom;

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Validates an IFD offset against the file size
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> TiffResult<()> {
    if offset >= file_size || offset < 8 {
        return Err(TiffError::GenericError(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Validates that a data block lies entirely inside the file
pub fn validate_block(offset: u64, byte_count: u64, file_size: u64) -> TiffResult<()> {
    match offset.checked_add(byte_count) {
        Some(end) if end <= file_size => Ok(()),
        _ => Err(TiffError::GenericError(format!(
            "Data block at {} with {} bytes exceeds file size {}",
            offset, byte_count, file_size
        ))),
    }
}

/// Gets the file size, restoring the reader position afterwards
///
/// Returns u64::MAX if the size cannot be determined.
pub fn get_file_size(reader: &mut dyn SeekableReader) -> TiffResult<u64> {
    let current_position = reader.stream_position()?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => size,
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            u64::MAX
        }
    };
    reader.seek(SeekFrom::Start(current_position))?;

    Ok(file_size)
}

/// Validates the BigTIFF header
///
/// After the version number (43) BigTIFF stores the offset size, which must
/// be 8, followed by a reserved zero.
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler,
) -> TiffResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let zeros = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, zeros);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || zeros != 0 {
        error!("Invalid BigTIFF header: offset_size={}, zeros={}", offset_size, zeros);
        return Err(TiffError::InvalidBigTIFFHeader);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ifd_offset_bounds() {
        assert!(validate_ifd_offset(8, 100).is_ok());
        assert!(validate_ifd_offset(4, 100).is_err());
        assert!(validate_ifd_offset(100, 100).is_err());
    }

    #[test]
    fn test_block_bounds() {
        assert!(validate_block(10, 90, 100).is_ok());
        assert!(validate_block(10, 91, 100).is_err());
        assert!(validate_block(u64::MAX, 2, u64::MAX).is_err());
    }

    #[test]
    fn test_file_size_keeps_position() {
        let mut cursor = Cursor::new(vec![0u8; 32]);
        cursor.set_position(5);
        assert_eq!(get_file_size(&mut cursor).unwrap(), 32);
        assert_eq!(cursor.position(), 5);
    }
}
