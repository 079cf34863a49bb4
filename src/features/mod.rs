//! Spectral feature extraction for well locations

mod bands;
mod discovery;
mod extractor;
mod indices;
mod resolver;

pub use bands::Band;
pub use discovery::find_raster_files;
pub use extractor::{BandFailure, FeatureExtractor, FeatureSet};
pub use indices::{meters_to_feet, rescale, SpectralIndex, METERS_TO_FEET, REFLECTANCE_SCALE};
pub use resolver::{BandResolver, ManifestResolver, RegexResolver, SubstringResolver};
