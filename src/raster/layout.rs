//! Block layout and sample encoding of a band raster

use std::fmt;
use log::debug;

use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{compression, planar_config, predictor, sample_format, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;

/// Largest decoded block the reader accepts
pub const MAX_BLOCK_BYTES: u64 = 1 << 30;

/// Numeric encoding of one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl SampleType {
    /// Maps the SampleFormat and BitsPerSample tags to a sample type
    pub fn from_tags(format: u64, bits: u64) -> TiffResult<Self> {
        let format_code = u16::try_from(format).unwrap_or(0);
        match (format_code, bits) {
            (sample_format::UNSIGNED, 8) => Ok(SampleType::U8),
            (sample_format::SIGNED, 8) => Ok(SampleType::I8),
            (sample_format::UNSIGNED, 16) => Ok(SampleType::U16),
            (sample_format::SIGNED, 16) => Ok(SampleType::I16),
            (sample_format::UNSIGNED, 32) => Ok(SampleType::U32),
            (sample_format::SIGNED, 32) => Ok(SampleType::I32),
            (sample_format::IEEEFP, 32) => Ok(SampleType::F32),
            (sample_format::IEEEFP, 64) => Ok(SampleType::F64),
            _ => Err(TiffError::UnsupportedSampleType(format, bits)),
        }
    }

    pub fn bytes(&self) -> usize {
        match self {
            SampleType::U8 | SampleType::I8 => 1,
            SampleType::U16 | SampleType::I16 => 2,
            SampleType::U32 | SampleType::I32 | SampleType::F32 => 4,
            SampleType::F64 => 8,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, SampleType::F32 | SampleType::F64)
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleType::U8 => "uint8",
            SampleType::I8 => "int8",
            SampleType::U16 => "uint16",
            SampleType::I16 => "int16",
            SampleType::U32 => "uint32",
            SampleType::I32 => "int32",
            SampleType::F32 => "float32",
            SampleType::F64 => "float64",
        };
        f.write_str(name)
    }
}

/// How pixel data is cut into blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    Strips { rows_per_strip: u64 },
    Tiles { width: u64, height: u64 },
}

/// Position of a pixel inside the block that stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPosition {
    pub index: usize,
    pub col: u64,
    pub row: u64,
    /// Pixels per row of the block
    pub width: u64,
    /// Rows actually stored in the block
    pub rows: u64,
}

/// Everything needed to find and decode one pixel of the first sample
#[derive(Debug, Clone)]
pub struct RasterLayout {
    pub width: u64,
    pub height: u64,
    pub sample_type: SampleType,
    pub samples_per_pixel: u64,
    pub planar: bool,
    pub compression: u64,
    pub predictor: u64,
    pub shape: BlockShape,
    pub offsets: Vec<u64>,
    pub byte_counts: Vec<u64>,
}

impl RasterLayout {
    /// Reads the layout tags of an IFD, rejecting encodings that cannot be sampled
    pub fn from_ifd(tiff_reader: &TiffReader, reader: &mut dyn SeekableReader, ifd: &IFD) -> TiffResult<Self> {
        let (width, height) = ifd.get_dimensions().ok_or(TiffError::MissingDimensions)?;
        if width == 0 || height == 0 {
            return Err(TiffError::MissingDimensions);
        }

        let bits = first_value(tiff_reader, reader, ifd, tags::BITS_PER_SAMPLE, 1)?;
        let format = first_value(tiff_reader, reader, ifd, tags::SAMPLE_FORMAT, sample_format::UNSIGNED as u64)?;
        let sample_type = SampleType::from_tags(format, bits)?;

        let samples_per_pixel = ifd.get_samples_per_pixel().max(1);
        let planar = ifd.get_tag_value(tags::PLANAR_CONFIGURATION)
            .map(|p| p == planar_config::PLANAR as u64)
            .unwrap_or(false);

        let compression = ifd.get_tag_value(tags::COMPRESSION).unwrap_or(compression::NONE as u64);
        let predictor = ifd.get_tag_value(tags::PREDICTOR).unwrap_or(predictor::NONE as u64);
        if predictor != predictor::NONE as u64 && predictor != predictor::HORIZONTAL_DIFFERENCING as u64 {
            return Err(TiffError::UnsupportedPredictor(predictor));
        }
        if predictor == predictor::HORIZONTAL_DIFFERENCING as u64 && sample_type.is_float() {
            return Err(TiffError::UnsupportedPredictor(predictor));
        }

        let (shape, offsets, byte_counts) = if ifd.is_tiled() {
            let shape = BlockShape::Tiles {
                width: ifd.get_tag_value(tags::TILE_WIDTH).unwrap_or(0),
                height: ifd.get_tag_value(tags::TILE_LENGTH).unwrap_or(0),
            };
            (
                shape,
                tiff_reader.read_tag_values(reader, ifd, tags::TILE_OFFSETS)?,
                tiff_reader.read_tag_values(reader, ifd, tags::TILE_BYTE_COUNTS)?,
            )
        } else {
            let rows_per_strip = ifd.get_tag_value(tags::ROWS_PER_STRIP).unwrap_or(height).clamp(1, height);
            (
                BlockShape::Strips { rows_per_strip },
                tiff_reader.read_tag_values(reader, ifd, tags::STRIP_OFFSETS)?,
                tiff_reader.read_tag_values(reader, ifd, tags::STRIP_BYTE_COUNTS)?,
            )
        };

        if let BlockShape::Tiles { width: 0, .. } | BlockShape::Tiles { height: 0, .. } = shape {
            return Err(TiffError::GenericError("Tile dimensions must be non-zero".to_string()));
        }
        if offsets.len() != byte_counts.len() {
            return Err(TiffError::GenericError(format!(
                "Mismatch between {} block offsets and {} byte counts", offsets.len(), byte_counts.len()
            )));
        }

        let layout = RasterLayout {
            width,
            height,
            sample_type,
            samples_per_pixel,
            planar,
            compression,
            predictor,
            shape,
            offsets,
            byte_counts,
        };

        let block_bytes = layout.full_block_bytes().filter(|len| *len <= MAX_BLOCK_BYTES).ok_or_else(|| {
            TiffError::GenericError(format!("Block shape {:?} exceeds {} bytes", layout.shape, MAX_BLOCK_BYTES))
        })?;
        debug!("Largest decoded block: {} bytes", block_bytes);

        let needed = layout.blocks_per_plane();
        if (layout.offsets.len() as u64) < needed {
            return Err(TiffError::GenericError(format!(
                "Expected at least {} blocks, found {}", needed, layout.offsets.len()
            )));
        }

        Ok(layout)
    }

    /// Decoded size of a full block, None on overflow
    fn full_block_bytes(&self) -> Option<u64> {
        let (width, rows) = match self.shape {
            BlockShape::Strips { rows_per_strip } => (self.width, rows_per_strip),
            BlockShape::Tiles { width, height } => (width, height),
        };
        width
            .checked_mul(rows)?
            .checked_mul(self.pixel_stride())?
            .checked_mul(self.sample_type.bytes() as u64)
    }

    /// Number of blocks holding one sample plane
    pub fn blocks_per_plane(&self) -> u64 {
        match self.shape {
            BlockShape::Strips { rows_per_strip } => self.height.div_ceil(rows_per_strip),
            BlockShape::Tiles { width, height } => self.width.div_ceil(width) * self.height.div_ceil(height),
        }
    }

    /// Interleaved samples per pixel inside a block
    pub fn pixel_stride(&self) -> u64 {
        if self.planar { 1 } else { self.samples_per_pixel }
    }

    /// Locates the block that stores pixel (col, row) of the first sample
    pub fn locate(&self, col: u64, row: u64) -> BlockPosition {
        match self.shape {
            BlockShape::Strips { rows_per_strip } => {
                let strip = row / rows_per_strip;
                BlockPosition {
                    index: strip as usize,
                    col,
                    row: row % rows_per_strip,
                    width: self.width,
                    rows: rows_per_strip.min(self.height - strip * rows_per_strip),
                }
            }
            BlockShape::Tiles { width, height } => {
                let tiles_across = self.width.div_ceil(width);
                BlockPosition {
                    index: ((row / height) * tiles_across + col / width) as usize,
                    col: col % width,
                    row: row % height,
                    width,
                    rows: height,
                }
            }
        }
    }

    /// Decoded size in bytes of a block at `position`
    pub fn block_len(&self, position: &BlockPosition) -> usize {
        (position.width * position.rows * self.pixel_stride()) as usize * self.sample_type.bytes()
    }
}

/// First value of a possibly per-sample tag, or `default` when absent
fn first_value(
    tiff_reader: &TiffReader,
    reader: &mut dyn SeekableReader,
    ifd: &IFD,
    tag: u16,
    default: u64,
) -> TiffResult<u64> {
    if !ifd.has_tag(tag) {
        return Ok(default);
    }
    Ok(tiff_reader.read_tag_values(reader, ifd, tag)?.first().copied().unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(shape: BlockShape, width: u64, height: u64) -> RasterLayout {
        RasterLayout {
            width,
            height,
            sample_type: SampleType::U16,
            samples_per_pixel: 1,
            planar: false,
            compression: 1,
            predictor: 1,
            shape,
            offsets: Vec::new(),
            byte_counts: Vec::new(),
        }
    }

    #[test]
    fn test_locate_in_short_last_strip() {
        let layout = layout(BlockShape::Strips { rows_per_strip: 4 }, 10, 10);
        let pos = layout.locate(3, 9);
        assert_eq!(pos, BlockPosition { index: 2, col: 3, row: 1, width: 10, rows: 2 });
        assert_eq!(layout.block_len(&pos), 40);
        assert_eq!(layout.blocks_per_plane(), 3);
    }

    #[test]
    fn test_locate_in_tiles() {
        let layout = layout(BlockShape::Tiles { width: 16, height: 16 }, 40, 20);
        let pos = layout.locate(35, 17);
        assert_eq!(pos.index, 5);
        assert_eq!((pos.col, pos.row), (3, 1));
        assert_eq!(layout.block_len(&pos), 16 * 16 * 2);
        assert_eq!(layout.blocks_per_plane(), 6);
    }

    #[test]
    fn test_oversized_blocks_are_measured_without_overflow() {
        let tiles = layout(BlockShape::Tiles { width: 1 << 32, height: 1 << 32 }, 10, 10);
        assert_eq!(tiles.full_block_bytes(), None);

        let strips = layout(BlockShape::Strips { rows_per_strip: 1 << 20 }, 1 << 20, 1 << 20);
        assert!(strips.full_block_bytes().unwrap() > MAX_BLOCK_BYTES);
    }

    #[test]
    fn test_sample_types() {
        assert_eq!(SampleType::from_tags(1, 16).unwrap(), SampleType::U16);
        assert_eq!(SampleType::from_tags(3, 32).unwrap(), SampleType::F32);
        assert!(matches!(SampleType::from_tags(3, 16), Err(TiffError::UnsupportedSampleType(3, 16))));
        assert!(SampleType::from_tags(1, 12).is_err());
    }
}
