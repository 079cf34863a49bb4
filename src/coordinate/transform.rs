//! Coordinate transformation functionality
//!
//! Only the forward transforms needed to bring WGS84 well locations into a
//! band raster's grid are implemented, plus the Web Mercator inverse.

use super::point::Point;
use super::crs::CoordinateSystem;
use crate::tiff::errors::{TiffError, TiffResult};
use std::f64::consts::PI;

/// Transformer for converting between coordinate systems
pub struct CoordinateTransformer;

impl CoordinateTransformer {
    /// Earth radius in meters (WGS84 semi-major axis)
    const EARTH_RADIUS: f64 = 6378137.0;
    /// WGS84 flattening
    const FLATTENING: f64 = 1.0 / 298.257223563;
    /// UTM scale factor on the central meridian
    const UTM_K0: f64 = 0.9996;
    const UTM_FALSE_EASTING: f64 = 500000.0;
    const UTM_FALSE_NORTHING_SOUTH: f64 = 10000000.0;

    /// Convert from WGS84 (EPSG:4326) to Web Mercator (EPSG:3857)
    pub fn wgs84_to_web_mercator(&self, lon: f64, lat: f64) -> Point {
        // Web Mercator is undefined at the poles
        let lat = lat.clamp(-85.05, 85.05);

        let x = lon * Self::EARTH_RADIUS * PI / 180.0;
        let y = f64::ln(f64::tan((90.0 + lat) * PI / 360.0)) * Self::EARTH_RADIUS;

        Point::new(x, y)
    }

    /// Convert from Web Mercator (EPSG:3857) to WGS84 (EPSG:4326)
    pub fn web_mercator_to_wgs84(&self, x: f64, y: f64) -> Point {
        let lon = x * 180.0 / (Self::EARTH_RADIUS * PI);
        let lat = 180.0 / PI * (2.0 * f64::atan(f64::exp(y / Self::EARTH_RADIUS)) - PI / 2.0);

        Point::new(lon, lat)
    }

    /// Convert from WGS84 to a UTM zone (transverse Mercator series, Snyder 8-9 to 8-10)
    ///
    /// The zone is taken from the target CRS rather than derived from the
    /// longitude, so points just outside a tile's nominal zone still land in
    /// the tile's grid.
    pub fn wgs84_to_utm(&self, lon: f64, lat: f64, zone: u8, is_northern: bool) -> Point {
        let a = Self::EARTH_RADIUS;
        let f = Self::FLATTENING;
        let e2 = f * (2.0 - f);
        let ep2 = e2 / (1.0 - e2);
        let k0 = Self::UTM_K0;

        let lon0 = (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0;
        let phi = lat.to_radians();
        let dlam = (lon - lon0).to_radians();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let big_a = cos_phi * dlam;

        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let m = a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

        let a2 = big_a * big_a;
        let a3 = a2 * big_a;
        let a4 = a3 * big_a;
        let a5 = a4 * big_a;
        let a6 = a5 * big_a;

        let x = k0 * n * (big_a
            + (1.0 - t + c) * a3 / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
            + Self::UTM_FALSE_EASTING;

        let mut y = k0 * (m + n * tan_phi * (a2 / 2.0
            + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
            + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

        if !is_northern {
            y += Self::UTM_FALSE_NORTHING_SOUTH;
        }

        Point::new(x, y)
    }

    /// Transform a point between coordinate systems
    pub fn transform_point(&self, point: &Point, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> TiffResult<Point> {
        if from_crs == to_crs {
            return Ok(*point);
        }

        match (from_crs, to_crs) {
            (CoordinateSystem::WGS84, CoordinateSystem::WebMercator) => {
                Ok(self.wgs84_to_web_mercator(point.x, point.y))
            }
            (CoordinateSystem::WebMercator, CoordinateSystem::WGS84) => {
                Ok(self.web_mercator_to_wgs84(point.x, point.y))
            }
            (CoordinateSystem::WGS84, CoordinateSystem::UTM(zone, is_northern)) => {
                Ok(self.wgs84_to_utm(point.x, point.y, *zone, *is_northern))
            }
            _ => Err(TiffError::UnsupportedTransform(from_crs.epsg_code(), to_crs.epsg_code())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_origin_of_zone() {
        let p = CoordinateTransformer.wgs84_to_utm(75.0, 0.0, 43, true);
        assert!((p.x - 500000.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_utm_central_meridian_northing() {
        // Meridian arc length at 10°N scaled by k0
        let p = CoordinateTransformer.wgs84_to_utm(75.0, 10.0, 43, true);
        assert!((p.x - 500000.0).abs() < 1e-6);
        assert!((p.y - 1105412.5).abs() < 2.0, "northing was {}", p.y);
    }

    #[test]
    fn test_utm_east_of_meridian_and_south_offset() {
        let north = CoordinateTransformer.wgs84_to_utm(77.0, 10.8, 43, true);
        assert!(north.x > 500000.0 && north.x < 800000.0);

        let south = CoordinateTransformer.wgs84_to_utm(75.0, -10.0, 43, false);
        assert!((south.y - (10000000.0 - 1105412.5)).abs() < 2.0);
    }

    #[test]
    fn test_web_mercator_round_trip() {
        let t = CoordinateTransformer;
        let p = t.wgs84_to_web_mercator(77.0, 10.8);
        let back = t.web_mercator_to_wgs84(p.x, p.y);
        assert!((back.x - 77.0).abs() < 1e-9);
        assert!((back.y - 10.8).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_pair() {
        let err = CoordinateTransformer
            .transform_point(&Point::new(0.0, 0.0), &CoordinateSystem::UTM(43, true), &CoordinateSystem::WGS84)
            .unwrap_err();
        assert!(matches!(err, TiffError::UnsupportedTransform(32643, 4326)));
    }
}
