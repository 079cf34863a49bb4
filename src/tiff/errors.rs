//! Custom error types for GeoTIFF reading

use std::fmt;
use std::io;

/// Errors raised while parsing or sampling a GeoTIFF
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTIFFHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Tag not found
    TagNotFound(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Unsupported compression method
    UnsupportedCompression(u64),
    /// Unsupported predictor
    UnsupportedPredictor(u64),
    /// Unsupported sample encoding (sample format, bits per sample)
    UnsupportedSampleType(u64, u64),
    /// Image dimensions not found
    MissingDimensions,
    /// The file carries no usable georeferencing
    NotGeoreferenced,
    /// No transformation between the two EPSG codes is implemented
    UnsupportedTransform(u32, u32),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::InvalidBigTIFFHeader => write!(f, "Invalid BigTIFF header"),
            TiffError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            TiffError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            TiffError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            TiffError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            TiffError::UnsupportedPredictor(p) => write!(f, "Unsupported predictor: {}", p),
            TiffError::UnsupportedSampleType(format, bits) => {
                write!(f, "Unsupported sample type: format {} with {} bits", format, bits)
            }
            TiffError::MissingDimensions => write!(f, "Image dimensions not found"),
            TiffError::NotGeoreferenced => write!(f, "Raster has no pixel scale/tiepoint or transformation"),
            TiffError::UnsupportedTransform(from, to) => {
                write!(f, "Unsupported coordinate transformation from EPSG:{} to EPSG:{}", from, to)
            }
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
