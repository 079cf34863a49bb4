//! Per-point spectral feature extraction
//!
//! For each configured band: resolve its raster, sample it under the well
//! points, rescale to reflectance. Then derive the indices whose inputs
//! were all sampled.

use std::path::{Path, PathBuf};
use log::{info, warn};

use crate::coordinate::PointSet;
use crate::errors::SurveyError;
use crate::raster::BandRaster;
use crate::tiff::errors::TiffResult;
use crate::utils::progress::ProgressTracker;

use super::bands::Band;
use super::indices::{self, SpectralIndex};
use super::resolver::BandResolver;

/// Why a band produced no column
#[derive(Debug)]
pub enum BandFailure {
    /// No raster matched the band
    NotFound,
    /// The matched raster could not be opened or sampled
    Unreadable { path: PathBuf, reason: String },
}

/// Sampled bands and derived indices for an ordered set of points
#[derive(Debug, Default)]
pub struct FeatureSet {
    /// Band columns in configured order
    pub bands: Vec<(Band, Vec<f64>)>,
    /// Index columns in configured order
    pub indices: Vec<(SpectralIndex, Vec<f64>)>,
    /// Bands that yielded no column
    pub failed_bands: Vec<(Band, BandFailure)>,
    /// Indices that could not be computed, with the missing-input error
    pub missing_indices: Vec<SurveyError>,
}

impl FeatureSet {
    pub fn band(&self, band: Band) -> Option<&[f64]> {
        self.bands.iter().find(|(b, _)| *b == band).map(|(_, values)| values.as_slice())
    }

    pub fn index(&self, index: SpectralIndex) -> Option<&[f64]> {
        self.indices.iter().find(|(i, _)| *i == index).map(|(_, values)| values.as_slice())
    }
}

/// Samples band rasters at points and derives indices
pub struct FeatureExtractor {
    resolver: Box<dyn BandResolver>,
    bands: Vec<Band>,
    indices: Vec<SpectralIndex>,
    epsilon: f64,
    /// Divisor applied to sampled values; None keeps raw digital numbers
    scale: Option<f64>,
}

impl FeatureExtractor {
    pub fn new(
        resolver: Box<dyn BandResolver>,
        bands: Vec<Band>,
        indices: Vec<SpectralIndex>,
        epsilon: f64,
        scale: Option<f64>,
    ) -> Self {
        FeatureExtractor { resolver, bands, indices, epsilon, scale }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Resolves every configured band against the candidate files
    pub fn resolve_bands(&self, candidates: &[PathBuf]) -> Vec<(Band, Option<PathBuf>)> {
        self.bands
            .iter()
            .map(|band| (*band, self.resolver.resolve(*band, candidates)))
            .collect()
    }

    /// Opens one raster and samples it; the file is closed when this returns
    pub fn sample_band(path: &Path, points: &PointSet) -> TiffResult<Vec<f64>> {
        let mut raster = BandRaster::open(path)?;
        raster.sample(points)
    }

    /// Runs the extraction over all bands and indices
    pub fn extract(&self, points: &PointSet, candidates: &[PathBuf], progress: &ProgressTracker) -> FeatureSet {
        let mut features = FeatureSet::default();

        info!("Resolving {} bands with the {} resolver", self.bands.len(), self.resolver.name());

        for (band, path) in self.resolve_bands(candidates) {
            progress.set_message(&format!("Sampling {}", band));

            match path {
                None => {
                    warn!("No raster found for band {}, column omitted", band);
                    features.failed_bands.push((band, BandFailure::NotFound));
                }
                Some(path) => match Self::sample_band(&path, points) {
                    Ok(mut values) => {
                        if let Some(scale) = self.scale {
                            indices::rescale(&mut values, scale);
                        }
                        info!("Sampled {} points from {} ({})", values.len(), path.display(), band);
                        features.bands.push((band, values));
                    }
                    Err(e) => {
                        warn!("Could not sample {} for band {}: {}; column omitted", path.display(), band, e);
                        features.failed_bands.push((band, BandFailure::Unreadable { path, reason: e.to_string() }));
                    }
                },
            }

            progress.increment(1);
        }

        for index in &self.indices {
            let result = {
                let lookup = |band: Band| features.band(band);
                index.compute(lookup, self.epsilon)
            };
            match result {
                Ok(values) => features.indices.push((*index, values)),
                Err(e) => {
                    warn!("{}; column omitted", e);
                    features.missing_indices.push(e);
                }
            }
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use crate::features::SubstringResolver;
    use crate::tiff::tests::test_utils::{GeoTiffFixture, Pixels};

    /// Writes a constant-valued 8x8 raster covering lon 76.6..77.4, lat 10.5..11.3
    fn write_band(dir: &Path, name: &str, value: u16) -> PathBuf {
        let fixture = GeoTiffFixture::geographic(8, 8, (76.6, 11.3), 0.1, Pixels::U16(vec![value; 64]));
        let path = dir.join(name);
        fs::write(&path, fixture.build()).unwrap();
        path
    }

    fn extractor(scale: Option<f64>) -> FeatureExtractor {
        FeatureExtractor::new(
            Box::new(SubstringResolver),
            vec![Band::B02, Band::B03, Band::B04, Band::B08, Band::B11],
            SpectralIndex::ALL.to_vec(),
            1e-10,
            scale,
        )
    }

    #[test]
    fn test_extract_samples_rescales_and_derives_indices() {
        let dir = tempdir().unwrap();
        let candidates = vec![
            write_band(dir.path(), "T43PFN_B02_10m.tif", 500),
            write_band(dir.path(), "T43PFN_B04_10m.tif", 1000),
            write_band(dir.path(), "T43PFN_B08_10m.tif", 3000),
        ];
        let points = PointSet::from_lon_lat(vec![(76.95, 10.85), (80.0, 10.85)]);

        let features = extractor(Some(10000.0)).extract(&points, &candidates, &ProgressTracker::hidden());

        assert_eq!(features.band(Band::B04).unwrap(), &[0.1, 0.0]);
        assert_eq!(features.band(Band::B08).unwrap(), &[0.3, 0.0]);

        let ndvi = features.index(SpectralIndex::Ndvi).unwrap();
        assert!((ndvi[0] - 0.5).abs() < 1e-6);
        assert_eq!(ndvi[1], 0.0);
        let ioi = features.index(SpectralIndex::Ioi).unwrap();
        assert!((ioi[0] - 2.0).abs() < 1e-6);

        // B03 and B11 have no raster, so CMI cannot be derived
        assert_eq!(features.failed_bands.len(), 2);
        assert!(features.index(SpectralIndex::Cmi).is_none());
        assert!(matches!(
            features.missing_indices.as_slice(),
            [SurveyError::MissingInput { index: SpectralIndex::Cmi, band: Band::B11 }]
        ));
    }

    #[test]
    fn test_raw_values_without_scale() {
        let dir = tempdir().unwrap();
        let candidates = vec![write_band(dir.path(), "S2_B04_.tif", 1234)];
        let points = PointSet::from_lon_lat(vec![(76.65, 11.25)]);

        let features = extractor(None).extract(&points, &candidates, &ProgressTracker::hidden());
        assert_eq!(features.band(Band::B04).unwrap(), &[1234.0]);
    }

    #[test]
    fn test_unreadable_raster_omits_band() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("S2_B08_broken.tif");
        fs::write(&broken, b"not a tiff").unwrap();
        let candidates = vec![write_band(dir.path(), "S2_B04_.tif", 1000), broken.clone()];
        let points = PointSet::from_lon_lat(vec![(76.65, 11.25)]);

        let features = extractor(Some(10000.0)).extract(&points, &candidates, &ProgressTracker::hidden());

        assert!(features.band(Band::B08).is_none());
        let unreadable = features.failed_bands.iter().find(|(band, _)| *band == Band::B08).unwrap();
        assert!(matches!(&unreadable.1, BandFailure::Unreadable { path, .. } if *path == broken));
        assert!(features.index(SpectralIndex::Ndvi).is_none());
    }
}
