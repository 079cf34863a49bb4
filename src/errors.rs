//! Error types for a survey run

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::features::{Band, SpectralIndex};
use crate::tiff::errors::TiffError;

/// Errors raised while loading inputs, extracting features or writing output
#[derive(Debug)]
pub enum SurveyError {
    /// I/O error
    Io(io::Error),
    /// Error from the CSV reader or writer
    Csv(csv::Error),
    /// Error from the GeoTIFF reader
    Tiff(TiffError),
    /// Invalid or unreadable configuration
    Config(String),
    /// The well table lacks a required column
    MissingColumn(String),
    /// No well reading falls inside the region
    EmptyRegion { loaded: usize },
    /// No raster files were found under the directory
    NoRasterFiles(PathBuf),
    /// An index needs a band that was not sampled
    MissingInput { index: SpectralIndex, band: Band },
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyError::Io(e) => write!(f, "I/O error: {}", e),
            SurveyError::Csv(e) => write!(f, "CSV error: {}", e),
            SurveyError::Tiff(e) => write!(f, "{}", e),
            SurveyError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SurveyError::MissingColumn(column) => write!(f, "Well table has no '{}' column", column),
            SurveyError::EmptyRegion { loaded } => {
                write!(f, "None of the {} valid well readings fall inside the region", loaded)
            }
            SurveyError::NoRasterFiles(dir) => write!(f, "No .tif/.tiff files found under {}", dir.display()),
            SurveyError::MissingInput { index, band } => {
                write!(f, "Cannot compute {}: band {} was not sampled", index, band)
            }
        }
    }
}

impl std::error::Error for SurveyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyError::Io(e) => Some(e),
            SurveyError::Csv(e) => Some(e),
            SurveyError::Tiff(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SurveyError {
    fn from(error: io::Error) -> Self {
        SurveyError::Io(error)
    }
}

impl From<csv::Error> for SurveyError {
    fn from(error: csv::Error) -> Self {
        SurveyError::Csv(error)
    }
}

impl From<TiffError> for SurveyError {
    fn from(error: TiffError) -> Self {
        SurveyError::Tiff(error)
    }
}

impl From<toml::de::Error> for SurveyError {
    fn from(error: toml::de::Error) -> Self {
        SurveyError::Config(error.to_string())
    }
}

/// Result type for survey operations
pub type SurveyResult<T> = Result<T, SurveyError>;
