//! Loading of the groundwater well table

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use crate::coordinate::{BoundingBox, Point, PointSet};
use crate::errors::{SurveyError, SurveyResult};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const DATE: &str = "date";
pub const CURRENT_LEVEL: &str = "currentlevel";

/// Columns every well table must carry, in output order
pub const REQUIRED_COLUMNS: [&str; 4] = [LATITUDE, LONGITUDE, DATE, CURRENT_LEVEL];

/// One valid row of the well table
#[derive(Debug, Clone, PartialEq)]
pub struct WellReading {
    pub latitude: f64,
    pub longitude: f64,
    pub date: String,
    /// Groundwater level in meters
    pub current_level: f64,
    /// Trimmed text of every source column, in header order
    pub record: StringRecord,
}

impl WellReading {
    /// Location as a (longitude, latitude) point
    pub fn location(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Column positions of the required fields
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    latitude: usize,
    longitude: usize,
    date: usize,
    current_level: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> SurveyResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| SurveyError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndex {
            latitude: find(LATITUDE)?,
            longitude: find(LONGITUDE)?,
            date: find(DATE)?,
            current_level: find(CURRENT_LEVEL)?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Option<WellReading> {
        let number = |idx: usize| {
            record.get(idx)
                .and_then(|field| field.parse::<f64>().ok())
                .filter(|value| value.is_finite())
        };

        let date = record.get(self.date).filter(|d| !d.is_empty())?;

        Some(WellReading {
            latitude: number(self.latitude)?,
            longitude: number(self.longitude)?,
            date: date.to_string(),
            current_level: number(self.current_level)?,
            record: record.clone(),
        })
    }
}

/// The valid readings of a well table plus its header row
#[derive(Debug, Clone)]
pub struct WellTable {
    pub headers: StringRecord,
    pub readings: Vec<WellReading>,
}

impl WellTable {
    /// Loads a CSV file with a header row
    pub fn load(path: &Path) -> SurveyResult<Self> {
        info!("Loading well readings from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a CSV stream, dropping rows with unparseable or missing required fields
    pub fn from_reader<R: Read>(reader: R) -> SurveyResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut readings = Vec::new();
        let mut dropped = 0;
        for result in rdr.records() {
            let record = result?;
            match columns.parse(&record) {
                Some(reading) => readings.push(reading),
                None => {
                    debug!("Dropping invalid well row at line {:?}", record.position().map(|p| p.line()));
                    dropped += 1;
                }
            }
        }

        info!("Loaded {} valid well readings, dropped {} invalid rows", readings.len(), dropped);
        Ok(WellTable { headers, readings })
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Keeps the readings whose location lies in `region`
    ///
    /// Edges count as inside when `inclusive` is set.
    pub fn filter_to_region(&self, region: &BoundingBox, inclusive: bool) -> WellTable {
        let readings: Vec<WellReading> = self.readings
            .iter()
            .filter(|reading| {
                let location = reading.location();
                if inclusive { region.contains(&location) } else { region.contains_strict(&location) }
            })
            .cloned()
            .collect();

        info!("{} of {} well readings inside the region", readings.len(), self.readings.len());
        WellTable { headers: self.headers.clone(), readings }
    }

    /// Locations of all readings as a WGS84 point set, in table order
    pub fn points(&self) -> PointSet {
        PointSet::from_lon_lat(self.readings.iter().map(|r| (r.longitude, r.latitude)))
    }
}
