//! Raster inspection command
//!
//! Prints the structure and georeferencing of one band raster, and
//! optionally the values under a few points.

use clap::ArgMatches;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::commands::command_traits::Command;
use crate::coordinate::{CoordinateSystem, CoordinateSystemFactory, Point, PointSet};
use crate::errors::{SurveyError, SurveyResult};
use crate::raster::BandRaster;
use crate::tiff::TiffReader;

pub struct InspectCommand {
    input_file: PathBuf,
    /// (x, y) pairs to sample, in `point_crs`
    points: Vec<(f64, f64)>,
    point_crs: CoordinateSystem,
    /// Also list the raw tags of the first IFD
    show_tags: bool,
}

impl InspectCommand {
    pub fn new(args: &ArgMatches) -> SurveyResult<Self> {
        let input_file = args.get_one::<String>("input")
            .map(PathBuf::from)
            .ok_or_else(|| SurveyError::Config("Missing input raster".to_string()))?;

        let points = args.get_many::<String>("point")
            .map(|values| values.map(|v| parse_coordinate(v)).collect::<SurveyResult<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        let point_crs = match args.get_one::<String>("point-crs") {
            Some(crs) => CoordinateSystemFactory::from_string(crs)?,
            None => CoordinateSystem::WGS84,
        };

        Ok(InspectCommand {
            input_file,
            points,
            point_crs,
            show_tags: args.get_flag("tags"),
        })
    }
}

/// Parses "x,y"
fn parse_coordinate(text: &str) -> SurveyResult<(f64, f64)> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => Ok((x, y)),
            _ => Err(SurveyError::Config(format!("Invalid coordinate '{}'", text))),
        },
        _ => Err(SurveyError::Config(format!("Coordinate must be 'x,y', got '{}'", text))),
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> SurveyResult<()> {
        debug!("Inspecting {}", self.input_file.display());
        let mut raster = BandRaster::open(&self.input_file)?;

        println!("{}", self.input_file.display());
        print!("{}", raster.summary());

        if self.show_tags {
            let mut reader = BufReader::new(File::open(&self.input_file)?);
            let tiff = TiffReader::new().read(&mut reader)?;
            if let Some(ifd) = tiff.main_ifd() {
                print!("{}", ifd);
            }
        }

        if !self.points.is_empty() {
            let points = PointSet::new(
                self.point_crs,
                self.points.iter().map(|(x, y)| Point::new(*x, *y)).collect(),
            );
            let values = raster.sample(&points)?;
            println!("  Samples ({}):", self.point_crs.description());
            for ((x, y), value) in self.points.iter().zip(values) {
                println!("    ({}, {}) -> {}", x, y, value);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("77.0, 10.8").unwrap(), (77.0, 10.8));
        assert!(parse_coordinate("77.0").is_err());
        assert!(parse_coordinate("east,10.8").is_err());
    }
}
