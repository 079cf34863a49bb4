//! Run configuration
//!
//! A run is described by a `SurveyConfig`, loaded from a TOML file or taken
//! from one of the built-in presets. Fields missing from a file fall back to
//! the `features` preset.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::coordinate::BoundingBox;
use crate::errors::{SurveyError, SurveyResult};
use crate::features::{
    Band, BandResolver, FeatureExtractor, ManifestResolver, RegexResolver, SpectralIndex, SubstringResolver,
    REFLECTANCE_SCALE,
};

/// Names accepted by `SurveyConfig::preset`
pub const PRESET_NAMES: [&str; 2] = ["features", "corrected"];

/// Latitude/longitude window the wells are filtered to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    /// Whether readings on the edges are kept
    #[serde(default = "default_true")]
    pub inclusive: bool,
}

fn default_true() -> bool {
    true
}

impl RegionConfig {
    /// The region as a lon/lat bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }

    /// Replaces the bounds with a lon/lat box, keeping the edge rule
    pub fn set_bounding_box(&mut self, bbox: &BoundingBox) {
        self.min_lon = bbox.min_x;
        self.min_lat = bbox.min_y;
        self.max_lon = bbox.max_x;
        self.max_lat = bbox.max_y;
    }
}

/// How band files are matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolverConfig {
    /// `_<band>_` token in the file name
    Substring,
    /// Regular expression with a `{band}` placeholder
    Regex { pattern: String },
    /// Explicit band-to-file table, relative to the raster directory
    Manifest { files: HashMap<Band, PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Directory the other paths are relative to
    pub base_dir: PathBuf,
    pub wells_file: PathBuf,
    pub raster_dir: PathBuf,
    pub output_file: PathBuf,
    pub region: RegionConfig,
    pub bands: Vec<Band>,
    pub indices: Vec<SpectralIndex>,
    /// Added to index denominators
    pub epsilon: f64,
    /// Divide sampled values by `reflectance_scale`
    pub rescale: bool,
    pub reflectance_scale: f64,
    /// Add `currentlevel_ft`
    pub feet_column: bool,
    /// Keep every source column instead of only the required four
    pub keep_all_columns: bool,
    pub resolver: ResolverConfig,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig::features()
    }
}

impl SurveyConfig {
    /// Inclusive region, reflectance output with the feet target, four columns
    pub fn features() -> Self {
        SurveyConfig {
            base_dir: PathBuf::from("."),
            wells_file: PathBuf::from("Groundwater.csv"),
            raster_dir: PathBuf::from("Pollachi"),
            output_file: PathBuf::from("final_groundwater_features.csv"),
            region: RegionConfig {
                min_lat: 10.5,
                max_lat: 11.3,
                min_lon: 76.6,
                max_lon: 77.4,
                inclusive: true,
            },
            bands: Band::ALL.to_vec(),
            indices: SpectralIndex::ALL.to_vec(),
            epsilon: 1e-10,
            rescale: true,
            reflectance_scale: REFLECTANCE_SCALE,
            feet_column: true,
            keep_all_columns: false,
            resolver: ResolverConfig::Substring,
        }
    }

    /// Strict wider region, raw digital numbers, every source column kept
    pub fn corrected() -> Self {
        SurveyConfig {
            output_file: PathBuf::from("Pollachi_Corrected_Values.csv"),
            region: RegionConfig {
                min_lat: 10.0,
                max_lat: 11.5,
                min_lon: 76.5,
                max_lon: 77.5,
                inclusive: false,
            },
            epsilon: 1e-5,
            rescale: false,
            feet_column: false,
            keep_all_columns: true,
            ..SurveyConfig::features()
        }
    }

    /// Looks up a built-in preset by name
    pub fn preset(name: &str) -> SurveyResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "features" => Ok(SurveyConfig::features()),
            "corrected" => Ok(SurveyConfig::corrected()),
            other => Err(SurveyError::Config(format!(
                "Unknown preset '{}', expected one of: {}", other, PRESET_NAMES.join(", ")
            ))),
        }
    }

    /// Parses a TOML document
    pub fn from_toml(text: &str) -> SurveyResult<Self> {
        let config: SurveyConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file; a relative `base_dir` is taken relative to the file
    pub fn from_file(path: &Path) -> SurveyResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| SurveyError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let mut config = Self::from_toml(&text)?;

        if config.base_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.base_dir = parent.join(&config.base_dir);
            }
        }
        Ok(config)
    }

    /// Rejects values that would make a run meaningless
    pub fn validate(&self) -> SurveyResult<()> {
        let region = &self.region;
        if region.min_lat > region.max_lat || region.min_lon > region.max_lon {
            return Err(SurveyError::Config("Region minimum exceeds maximum".to_string()));
        }
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return Err(SurveyError::Config(format!("epsilon must be positive, got {}", self.epsilon)));
        }
        if self.rescale && (self.reflectance_scale.is_nan() || self.reflectance_scale <= 0.0) {
            return Err(SurveyError::Config(format!(
                "reflectance_scale must be positive, got {}", self.reflectance_scale
            )));
        }
        if self.bands.is_empty() {
            return Err(SurveyError::Config("No bands configured".to_string()));
        }
        Ok(())
    }

    pub fn wells_path(&self) -> PathBuf {
        self.base_dir.join(&self.wells_file)
    }

    pub fn raster_path(&self) -> PathBuf {
        self.base_dir.join(&self.raster_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_file)
    }

    /// Builds the configured band resolver
    pub fn band_resolver(&self) -> SurveyResult<Box<dyn BandResolver>> {
        Ok(match &self.resolver {
            ResolverConfig::Substring => Box::new(SubstringResolver),
            ResolverConfig::Regex { pattern } => Box::new(RegexResolver::new(pattern)?),
            ResolverConfig::Manifest { files } => Box::new(ManifestResolver::new(files.clone(), &self.raster_path())),
        })
    }

    /// Builds the feature extractor this configuration describes
    pub fn feature_extractor(&self) -> SurveyResult<FeatureExtractor> {
        Ok(FeatureExtractor::new(
            self.band_resolver()?,
            self.bands.clone(),
            self.indices.clone(),
            self.epsilon,
            self.rescale.then_some(self.reflectance_scale),
        ))
    }
}
