//! Writes the joined well/feature table as CSV
//!
//! The table goes to a temporary file next to the destination and is renamed
//! into place once complete. A failed write leaves no partial file.

use std::io::Write;
use std::path::Path;
use csv::{StringRecord, Writer};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::errors::{SurveyError, SurveyResult};
use crate::features::FeatureSet;
use crate::wells::{WellTable, REQUIRED_COLUMNS};

/// Header of the converted groundwater level column
pub const FEET_COLUMN: &str = "currentlevel_ft";

/// Which source columns are carried into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelection {
    /// latitude, longitude, date, currentlevel
    Required,
    /// Every column of the source table, in source order
    All,
}

/// Source column positions to copy, paired with their output names
fn source_columns(wells: &WellTable, selection: ColumnSelection) -> SurveyResult<Vec<(usize, String)>> {
    match selection {
        ColumnSelection::All => Ok(wells.headers.iter().map(|h| h.to_string()).enumerate().collect()),
        ColumnSelection::Required => REQUIRED_COLUMNS
            .iter()
            .map(|name| {
                wells.headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(name))
                    .map(|idx| (idx, name.to_string()))
                    .ok_or_else(|| SurveyError::MissingColumn(name.to_string()))
            })
            .collect(),
    }
}

/// Output header row: source columns, bands, indices, then the feet column
pub fn feature_headers(
    wells: &WellTable,
    features: &FeatureSet,
    selection: ColumnSelection,
    feet: bool,
) -> SurveyResult<Vec<String>> {
    let mut headers: Vec<String> = source_columns(wells, selection)?
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    headers.extend(features.bands.iter().map(|(band, _)| band.code().to_string()));
    headers.extend(features.indices.iter().map(|(index, _)| index.name().to_string()));
    if feet {
        headers.push(FEET_COLUMN.to_string());
    }
    Ok(headers)
}

/// Writes one row per well reading to `path`, replacing any existing file
///
/// `feet` carries the converted level per reading when the column is wanted.
pub fn write_feature_table(
    path: &Path,
    wells: &WellTable,
    features: &FeatureSet,
    selection: ColumnSelection,
    feet: Option<&[f64]>,
) -> SurveyResult<usize> {
    let columns = source_columns(wells, selection)?;
    let headers = feature_headers(wells, features, selection, feet.is_some())?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(parent)?;
    debug!("Writing feature table through {}", temp.path().display());

    let mut writer = Writer::from_writer(temp);
    writer.write_record(&headers)?;

    for (row, reading) in wells.readings.iter().enumerate() {
        let mut record = StringRecord::with_capacity(0, headers.len());
        for (idx, _) in &columns {
            record.push_field(reading.record.get(*idx).unwrap_or(""));
        }
        for (_, values) in features.bands.iter() {
            record.push_field(&format_value(values[row]));
        }
        for (_, values) in features.indices.iter() {
            record.push_field(&format_value(values[row]));
        }
        if let Some(feet) = feet {
            record.push_field(&format_value(feet[row]));
        }
        writer.write_record(&record)?;
    }

    let mut temp = writer.into_inner().map_err(|e| SurveyError::Io(e.into_error()))?;
    temp.flush()?;
    temp.persist(path).map_err(|e| SurveyError::Io(e.error))?;

    info!("Wrote {} rows with {} columns to {}", wells.len(), headers.len(), path.display());
    Ok(wells.len())
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use crate::features::{Band, SpectralIndex};

    const TABLE: &str = "\
Latitude,Longitude,Date,Currentlevel,District
10.8,77.0,2020-01-01,5.0,Coimbatore
10.9,77.1,2020-02-01,6.5,Tiruppur
";

    fn features() -> FeatureSet {
        FeatureSet {
            bands: vec![(Band::B04, vec![0.1, 0.2]), (Band::B08, vec![0.3, 0.25])],
            indices: vec![(SpectralIndex::Ndvi, vec![0.5, 0.1])],
            ..FeatureSet::default()
        }
    }

    #[test]
    fn test_required_columns_then_features() {
        let wells = WellTable::from_reader(TABLE.as_bytes()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let feet = vec![16.405, 21.3265];
        let rows = write_feature_table(&path, &wells, &features(), ColumnSelection::Required, Some(&feet)).unwrap();
        assert_eq!(rows, 2);

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "latitude,longitude,date,currentlevel,B04,B08,NDVI,currentlevel_ft");
        assert_eq!(lines[1], "10.8,77.0,2020-01-01,5.0,0.1,0.3,0.5,16.405");
        assert_eq!(lines.len(), 3);

        // Only the destination remains in the directory
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_all_columns_keep_source_headers() {
        let wells = WellTable::from_reader(TABLE.as_bytes()).unwrap();
        let headers = feature_headers(&wells, &features(), ColumnSelection::All, false).unwrap();
        assert_eq!(headers, vec!["Latitude", "Longitude", "Date", "Currentlevel", "District", "B04", "B08", "NDVI"]);
    }

    #[test]
    fn test_existing_file_is_replaced() {
        let wells = WellTable::from_reader(TABLE.as_bytes()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale").unwrap();

        write_feature_table(&path, &wells, &FeatureSet::default(), ColumnSelection::All, None).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Latitude,Longitude,Date,Currentlevel,District\n"));
    }
}
