//! Band-to-file resolution strategies
//!
//! A resolver picks the raster for a band out of the discovered files.
//! "Not found" is `None`, never an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use log::warn;
use regex::Regex;

use crate::errors::{SurveyError, SurveyResult};
use super::bands::Band;

/// Strategy for mapping a band code to a raster file
pub trait BandResolver {
    /// Picks the file for `band`; the lexicographically first match wins
    fn resolve(&self, band: Band, candidates: &[PathBuf]) -> Option<PathBuf>;

    /// Short name for log messages
    fn name(&self) -> &'static str;
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Matches the `_<band>_` token in the file name (`T43PFN_20240101_B04_10m.tif`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringResolver;

impl BandResolver for SubstringResolver {
    fn resolve(&self, band: Band, candidates: &[PathBuf]) -> Option<PathBuf> {
        let token = format!("_{}_", band.code());
        candidates
            .iter()
            .filter(|path| file_name(path).is_some_and(|name| name.contains(&token)))
            .min()
            .cloned()
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

/// Matches file names against a pattern with a `{band}` placeholder
#[derive(Debug, Clone)]
pub struct RegexResolver {
    patterns: HashMap<Band, Regex>,
}

impl RegexResolver {
    /// Compiles `pattern` once per band, e.g. `^T\d{2}[A-Z]{3}_\d{8}T\d{6}_{band}_10m\.tif$`
    pub fn new(pattern: &str) -> SurveyResult<Self> {
        if !pattern.contains("{band}") {
            return Err(SurveyError::Config(format!("Band pattern '{}' has no {{band}} placeholder", pattern)));
        }

        let mut patterns = HashMap::new();
        for band in Band::ALL {
            let source = pattern.replace("{band}", band.code());
            let regex = Regex::new(&source)
                .map_err(|e| SurveyError::Config(format!("Invalid band pattern '{}': {}", pattern, e)))?;
            patterns.insert(band, regex);
        }
        Ok(RegexResolver { patterns })
    }
}

impl BandResolver for RegexResolver {
    fn resolve(&self, band: Band, candidates: &[PathBuf]) -> Option<PathBuf> {
        let regex = self.patterns.get(&band)?;
        candidates
            .iter()
            .filter(|path| file_name(path).is_some_and(|name| regex.is_match(name)))
            .min()
            .cloned()
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Looks bands up in an explicit band-to-path table
#[derive(Debug, Clone, Default)]
pub struct ManifestResolver {
    entries: HashMap<Band, PathBuf>,
}

impl ManifestResolver {
    /// Relative manifest paths are taken relative to `base_dir`
    pub fn new(entries: HashMap<Band, PathBuf>, base_dir: &Path) -> Self {
        let entries = entries
            .into_iter()
            .map(|(band, path)| {
                let path = if path.is_absolute() { path } else { base_dir.join(path) };
                (band, path)
            })
            .collect();
        ManifestResolver { entries }
    }
}

impl BandResolver for ManifestResolver {
    fn resolve(&self, band: Band, _candidates: &[PathBuf]) -> Option<PathBuf> {
        let path = self.entries.get(&band)?;
        if path.is_file() {
            Some(path.clone())
        } else {
            warn!("Manifest entry for {} points to missing file {}", band, path.display());
            None
        }
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
