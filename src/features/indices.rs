//! Reflectance rescaling, band-ratio indices and unit conversion

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::{SurveyError, SurveyResult};
use super::bands::Band;

/// Sentinel-2 L2A digital numbers per unit of reflectance
pub const REFLECTANCE_SCALE: f64 = 10000.0;

/// Feet per meter, as used for the groundwater level target
pub const METERS_TO_FEET: f64 = 3.281;

/// Divides every sampled value by `scale`
pub fn rescale(values: &mut [f64], scale: f64) {
    for value in values.iter_mut() {
        *value /= scale;
    }
}

/// Converts a depth in meters to feet
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * METERS_TO_FEET
}

/// Band-ratio indices derived per point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpectralIndex {
    /// (B08 - B04) / (B08 + B04 + eps), vegetation density
    Ndvi,
    /// B04 / (B02 + eps), iron oxide
    Ioi,
    /// B11 / (B08 + eps), clay and moisture
    Cmi,
}

impl SpectralIndex {
    pub const ALL: [SpectralIndex; 3] = [SpectralIndex::Ndvi, SpectralIndex::Ioi, SpectralIndex::Cmi];

    /// Column header
    pub fn name(&self) -> &'static str {
        match self {
            SpectralIndex::Ndvi => "NDVI",
            SpectralIndex::Ioi => "IOI",
            SpectralIndex::Cmi => "CMI",
        }
    }

    /// (numerator band, denominator band)
    pub fn inputs(&self) -> (Band, Band) {
        match self {
            SpectralIndex::Ndvi => (Band::B08, Band::B04),
            SpectralIndex::Ioi => (Band::B04, Band::B02),
            SpectralIndex::Cmi => (Band::B11, Band::B08),
        }
    }

    /// Index value for one point; `epsilon` keeps zero denominators finite
    pub fn value(&self, first: f64, second: f64, epsilon: f64) -> f64 {
        match self {
            SpectralIndex::Ndvi => (first - second) / (first + second + epsilon),
            SpectralIndex::Ioi | SpectralIndex::Cmi => first / (second + epsilon),
        }
    }

    /// Computes the index over sampled band columns
    ///
    /// `lookup` returns the column of a band, or None when the band was not
    /// sampled; in that case the index fails with a missing-input error.
    pub fn compute<'a>(
        &self,
        lookup: impl Fn(Band) -> Option<&'a [f64]>,
        epsilon: f64,
    ) -> SurveyResult<Vec<f64>> {
        let (first_band, second_band) = self.inputs();
        let first = lookup(first_band).ok_or(SurveyError::MissingInput { index: *self, band: first_band })?;
        let second = lookup(second_band).ok_or(SurveyError::MissingInput { index: *self, band: second_band })?;

        Ok(first
            .iter()
            .zip(second)
            .map(|(a, b)| self.value(*a, *b, epsilon))
            .collect())
    }
}

impl fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpectralIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_uppercase();
        SpectralIndex::ALL
            .iter()
            .copied()
            .find(|index| index.name() == name)
            .ok_or_else(|| format!("Unknown index '{}', expected NDVI, IOI or CMI", s.trim()))
    }
}
