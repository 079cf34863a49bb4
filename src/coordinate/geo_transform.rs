//! Affine mapping between raster grid and CRS coordinates
//!
//! Coefficients follow the GDAL convention:
//! `x = c0 + col * c1 + row * c2`, `y = c3 + col * c4 + row * c5`.

use std::fmt;

use super::point::Point;

/// Six-coefficient affine geotransform of a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub coefficients: [f64; 6],
}

impl GeoTransform {
    pub fn new(coefficients: [f64; 6]) -> Self {
        GeoTransform { coefficients }
    }

    /// Builds a north-up transform from an origin and pixel size
    ///
    /// `pixel_height` is the positive ground height of a pixel; rows grow
    /// southwards so the stored coefficient is negated.
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        GeoTransform::new([origin_x, pixel_width, 0.0, origin_y, 0.0, -pixel_height])
    }

    pub fn origin(&self) -> Point {
        Point::new(self.coefficients[0], self.coefficients[3])
    }

    pub fn pixel_size(&self) -> (f64, f64) {
        (self.coefficients[1], self.coefficients[5])
    }

    /// CRS coordinate of a (fractional) grid position
    pub fn apply(&self, col: f64, row: f64) -> Point {
        let c = &self.coefficients;
        Point::new(c[0] + col * c[1] + row * c[2], c[3] + col * c[4] + row * c[5])
    }

    /// Fractional (col, row) of a CRS coordinate, or None for a degenerate transform
    pub fn pixel_of(&self, point: &Point) -> Option<(f64, f64)> {
        let c = &self.coefficients;
        let det = c[1] * c[5] - c[2] * c[4];
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let dx = point.x - c[0];
        let dy = point.y - c[3];
        let col = (dx * c[5] - dy * c[2]) / det;
        let row = (dy * c[1] - dx * c[4]) / det;
        Some((col, row))
    }

    /// Nearest-pixel index of a coordinate inside a `width` x `height` grid
    ///
    /// The pixel whose area contains the point is chosen (floor of the
    /// fractional position); anything outside the grid gives None.
    pub fn to_pixel_index(&self, point: &Point, width: u64, height: u64) -> Option<(u64, u64)> {
        let (col, row) = self.pixel_of(point)?;
        if !col.is_finite() || !row.is_finite() {
            return None;
        }

        let col = col.floor();
        let row = row.floor();
        if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
            return None;
        }
        Some((col as u64, row as u64))
    }
}

impl fmt::Display for GeoTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.coefficients;
        write!(f, "[{}, {}, {}, {}, {}, {}]", c[0], c[1], c[2], c[3], c[4], c[5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel_tile() -> GeoTransform {
        GeoTransform::north_up(600000.0, 1200000.0, 10.0, 10.0)
    }

    #[test]
    fn test_nearest_pixel_floor() {
        let gt = sentinel_tile();
        assert_eq!(gt.to_pixel_index(&Point::new(600000.0, 1200000.0), 100, 100), Some((0, 0)));
        assert_eq!(gt.to_pixel_index(&Point::new(600019.9, 1199980.1), 100, 100), Some((1, 1)));
        assert_eq!(gt.to_pixel_index(&Point::new(600995.0, 1199005.0), 100, 100), Some((99, 99)));
    }

    #[test]
    fn test_outside_extent() {
        let gt = sentinel_tile();
        assert_eq!(gt.to_pixel_index(&Point::new(599999.0, 1199990.0), 100, 100), None);
        assert_eq!(gt.to_pixel_index(&Point::new(601000.0, 1199990.0), 100, 100), None);
        assert_eq!(gt.to_pixel_index(&Point::new(600010.0, 1200001.0), 100, 100), None);
    }

    #[test]
    fn test_rotated_inverse() {
        let gt = GeoTransform::new([100.0, 2.0, 1.0, 50.0, 0.5, -3.0]);
        let p = gt.apply(4.25, 7.5);
        let (col, row) = gt.pixel_of(&p).unwrap();
        assert!((col - 4.25).abs() < 1e-9);
        assert!((row - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate() {
        let gt = GeoTransform::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(gt.pixel_of(&Point::new(1.0, 1.0)).is_none());
    }
}
