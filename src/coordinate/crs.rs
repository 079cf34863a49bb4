//! Coordinate Reference System handling

use crate::tiff::constants::epsg;
use crate::tiff::errors::{TiffError, TiffResult};

/// Identifier for the coordinate systems band rasters come in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM zone on WGS 84 (EPSG:326xx north, 327xx south)
    UTM(u8, bool),
    /// Any other EPSG code; points can be tagged with it but not reprojected
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => epsg::WGS84,
            CoordinateSystem::WebMercator => epsg::WEB_MERCATOR,
            CoordinateSystem::UTM(zone, true) => 32600 + *zone as u32,
            CoordinateSystem::UTM(zone, false) => 32700 + *zone as u32,
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                let hemisphere = if *is_northern { 'N' } else { 'S' };
                format!("WGS 84 / UTM zone {}{} (EPSG:{})", zone, hemisphere, self.epsg_code())
            }
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }
}

/// Factory for creating coordinate systems
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(code: u32) -> CoordinateSystem {
        match code {
            epsg::WGS84 => CoordinateSystem::WGS84,
            epsg::WEB_MERCATOR => CoordinateSystem::WebMercator,
            32601..=32660 => CoordinateSystem::UTM((code - 32600) as u8, true),
            32701..=32760 => CoordinateSystem::UTM((code - 32700) as u8, false),
            _ => CoordinateSystem::Other(code),
        }
    }

    /// Parse a coordinate system from a string (e.g. "EPSG:4326" or "32643")
    pub fn from_string(crs_str: &str) -> TiffResult<CoordinateSystem> {
        let crs_str = crs_str.trim().to_uppercase();
        let code_str = crs_str.strip_prefix("EPSG:").unwrap_or(&crs_str);

        code_str
            .parse::<u32>()
            .map(Self::from_epsg)
            .map_err(|_| TiffError::GenericError(format!("Unsupported CRS format: {}", crs_str)))
    }
}
