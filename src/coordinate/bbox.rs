//! Bounding box structure for defining regions

use super::point::Point;

/// An axis-aligned box in a coordinate system
///
/// For the well-region filter x is longitude and y is latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Parse a bounding box from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> Result<Self, String> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err("Bounding box must have 4 comma-separated values".to_string());
        }

        let parse = |value: &str, name: &str| {
            value.trim().parse::<f64>().map_err(|_| format!("Invalid {} value: {}", name, value.trim()))
        };

        let bbox = BoundingBox::new(
            parse(parts[0], "min_x")?,
            parse(parts[1], "min_y")?,
            parse(parts[2], "max_x")?,
            parse(parts[3], "max_y")?,
        );

        if bbox.min_x > bbox.max_x || bbox.min_y > bbox.max_y {
            return Err(format!("Bounding box minimum exceeds maximum: {}", bbox_str));
        }
        Ok(bbox)
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if this bounding box contains a point, edges included
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    /// Check if a point lies strictly inside the box, edges excluded
    pub fn contains_strict(&self, point: &Point) -> bool {
        point.x > self.min_x && point.x < self.max_x &&
            point.y > self.min_y && point.y < self.max_y
    }
}
