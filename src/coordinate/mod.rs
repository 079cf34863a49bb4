//! Coordinate handling for well locations and raster grids
//!
//! Well locations arrive as WGS84 longitude/latitude. Band rasters are
//! usually in a projected system (UTM for Sentinel-2 tiles), so point sets
//! are reprojected as a whole before they are looked up in a raster grid.

mod bbox;
mod point;
mod transform;
mod crs;
mod geo_transform;

pub use self::bbox::BoundingBox;
pub use self::point::{Point, PointSet};
pub use self::transform::CoordinateTransformer;
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory};
pub use self::geo_transform::GeoTransform;
