//! End-to-end survey run
//!
//! load wells -> filter to region -> discover rasters -> extract features
//! -> convert levels -> write table

use std::fmt;
use std::path::PathBuf;
use log::{info, warn};

use crate::config::SurveyConfig;
use crate::errors::{SurveyError, SurveyResult};
use crate::features::{find_raster_files, meters_to_feet, Band, SpectralIndex};
use crate::output::{write_feature_table, ColumnSelection};
use crate::utils::progress::ProgressTracker;
use crate::wells::WellTable;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Valid readings in the source table
    pub loaded: usize,
    /// Readings inside the region, one output row each
    pub rows: usize,
    pub raster_files: usize,
    pub sampled_bands: Vec<Band>,
    pub failed_bands: Vec<Band>,
    pub indices: Vec<SpectralIndex>,
    pub missing_indices: usize,
    pub output: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: Vec<String>| if items.is_empty() { "-".to_string() } else { items.join(", ") };

        writeln!(f, "Wells loaded:    {}", self.loaded)?;
        writeln!(f, "Wells in region: {}", self.rows)?;
        writeln!(f, "Raster files:    {}", self.raster_files)?;
        writeln!(f, "Bands sampled:   {}", join(self.sampled_bands.iter().map(|b| b.to_string()).collect()))?;
        if !self.failed_bands.is_empty() {
            writeln!(f, "Bands omitted:   {}", join(self.failed_bands.iter().map(|b| b.to_string()).collect()))?;
        }
        writeln!(f, "Indices:         {}", join(self.indices.iter().map(|i| i.to_string()).collect()))?;
        write!(f, "Output:          {}", self.output.display())
    }
}

/// Runs the configured survey and writes the feature table
///
/// Fatal conditions (no readings in the region, no rasters at all) return
/// before anything is written.
pub fn run(config: &SurveyConfig, progress: &ProgressTracker) -> SurveyResult<RunSummary> {
    config.validate()?;

    let table = WellTable::load(&config.wells_path())?;
    let region = config.region.bounding_box();
    let wells = table.filter_to_region(&region, config.region.inclusive);
    if wells.is_empty() {
        return Err(SurveyError::EmptyRegion { loaded: table.len() });
    }

    let raster_files = find_raster_files(&config.raster_path())?;
    info!("Found {} raster files under {}", raster_files.len(), config.raster_path().display());

    let extractor = config.feature_extractor()?;
    let points = wells.points();
    let features = extractor.extract(&points, &raster_files, progress);

    if features.bands.is_empty() {
        warn!("No band could be sampled; the output holds the well columns only");
    }

    let feet: Option<Vec<f64>> = config.feet_column.then(|| {
        wells.readings.iter().map(|r| meters_to_feet(r.current_level)).collect()
    });

    let selection = if config.keep_all_columns { ColumnSelection::All } else { ColumnSelection::Required };
    let output = config.output_path();
    let rows = write_feature_table(&output, &wells, &features, selection, feet.as_deref())?;

    progress.finish();

    Ok(RunSummary {
        loaded: table.len(),
        rows,
        raster_files: raster_files.len(),
        sampled_bands: features.bands.iter().map(|(band, _)| *band).collect(),
        failed_bands: features.failed_bands.iter().map(|(band, _)| *band).collect(),
        indices: features.indices.iter().map(|(index, _)| *index).collect(),
        missing_indices: features.missing_indices.len(),
        output,
    })
}
