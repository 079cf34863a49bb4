//! Band raster access
//!
//! Opens single-band GeoTIFFs and samples them at point locations.

mod band_raster;
mod decode;
mod layout;

pub use band_raster::{BandRaster, RasterSummary, DEFAULT_NODATA};
pub use layout::{BlockShape, RasterLayout, SampleType};
