//! Points and CRS-tagged point sets

use super::crs::CoordinateSystem;
use super::transform::CoordinateTransformer;
use crate::tiff::errors::TiffResult;

/// A point in a coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (longitude in geographic systems)
    pub x: f64,
    /// Y coordinate (latitude in geographic systems)
    pub y: f64,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An ordered set of points that share one coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    crs: CoordinateSystem,
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(crs: CoordinateSystem, points: Vec<Point>) -> Self {
        PointSet { crs, points }
    }

    /// Builds a WGS84 point set from (longitude, latitude) pairs
    pub fn from_lon_lat(coords: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let points = coords.into_iter().map(|(lon, lat)| Point::new(lon, lat)).collect();
        PointSet::new(CoordinateSystem::WGS84, points)
    }

    pub fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns this set expressed in `target`
    ///
    /// Either every point is converted or the call fails.
    pub fn reproject(&self, target: CoordinateSystem) -> TiffResult<PointSet> {
        if self.crs == target {
            return Ok(self.clone());
        }

        let transformer = CoordinateTransformer;
        let points = self.points
            .iter()
            .map(|point| transformer.transform_point(point, &self.crs, &target))
            .collect::<TiffResult<Vec<_>>>()?;

        Ok(PointSet::new(target, points))
    }
}
