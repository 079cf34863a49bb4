pub mod io;
pub mod tiff;
pub mod compression;
pub mod coordinate;
pub mod raster;
pub mod features;
pub mod wells;
pub mod output;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod commands;
pub mod utils;

pub use config::SurveyConfig;
pub use coordinate::{BoundingBox, CoordinateSystem, Point, PointSet};
pub use errors::{SurveyError, SurveyResult};
pub use features::{Band, FeatureExtractor, FeatureSet, SpectralIndex};
pub use pipeline::{run, RunSummary};
pub use raster::BandRaster;
pub use tiff::TiffReader;
pub use wells::WellTable;
