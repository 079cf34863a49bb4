//! GeoTIFF metadata and GeoKey parsing
//!
//! Turns the GeoKey directory and the model tags of a band raster into the
//! two things sampling needs: the CRS code and the pixel-to-CRS geotransform.

use std::fmt;
use log::debug;

use crate::coordinate::GeoTransform;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{epsg, geo_keys, model_type, raster_type, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;

/// One entry of the GeoKey directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    /// 0 when the value is stored in `value_offset` itself
    pub tiff_tag_location: u16,
    pub count: u16,
    pub value_offset: u16,
}

impl GeoKeyEntry {
    pub fn new(key_id: u16, tiff_tag_location: u16, count: u16, value_offset: u16) -> Self {
        GeoKeyEntry { key_id, tiff_tag_location, count, value_offset }
    }

    /// The short value of a key stored directly in the directory
    pub fn inline_value(&self) -> Option<u16> {
        (self.tiff_tag_location == 0).then_some(self.value_offset)
    }
}

/// Name of the GeoKeys the parser interprets
pub fn get_key_name(key_id: u16) -> &'static str {
    match key_id {
        geo_keys::MODEL_TYPE => "GTModelTypeGeoKey",
        geo_keys::RASTER_TYPE => "GTRasterTypeGeoKey",
        geo_keys::GEOGRAPHIC_TYPE => "GeographicTypeGeoKey",
        geo_keys::PROJECTED_CS_TYPE => "ProjectedCSTypeGeoKey",
        _ => "Unknown",
    }
}

/// Georeferencing of a raster
#[derive(Debug, Clone, PartialEq)]
pub struct GeoInfo {
    /// EPSG code of the CRS, from ProjectedCSType or GeographicType
    pub epsg_code: Option<u32>,
    /// GTModelType (1 projected, 2 geographic)
    pub model_type: Option<u16>,
    /// GTRasterType (1 PixelIsArea, 2 PixelIsPoint); PixelIsArea when absent
    pub raster_type: u16,
    /// Maps the corner of pixel (0, 0) to CRS coordinates
    pub transform: GeoTransform,
}

impl fmt::Display for GeoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg_code {
            Some(code) => writeln!(f, "  EPSG: {}", code)?,
            None => writeln!(f, "  EPSG: unknown")?,
        }
        let model = match self.model_type {
            Some(model_type::PROJECTED) => "Projected",
            Some(model_type::GEOGRAPHIC) => "Geographic",
            Some(_) => "Other",
            None => "Not declared",
        };
        writeln!(f, "  Model type: {}", model)?;
        let raster = if self.raster_type == raster_type::PIXEL_IS_POINT { "PixelIsPoint" } else { "PixelIsArea" };
        writeln!(f, "  Raster type: {}", raster)?;
        writeln!(f, "  Geotransform: {}", self.transform)
    }
}

/// Parser for GeoTIFF geographic metadata
pub struct GeoKeyParser;

impl GeoKeyParser {
    /// Parse the GeoKey directory of an IFD
    ///
    /// The directory is an array of shorts: a four-value header (version,
    /// revision, minor revision, key count) followed by four shorts per key.
    /// A missing directory yields an empty list.
    pub fn parse_geo_key_directory(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
    ) -> TiffResult<Vec<GeoKeyEntry>> {
        if !ifd.has_tag(tags::GEO_KEY_DIRECTORY_TAG) {
            return Ok(Vec::new());
        }

        let values = tiff_reader.read_tag_values(reader, ifd, tags::GEO_KEY_DIRECTORY_TAG)?;
        if values.len() < 4 {
            return Err(TiffError::GenericError("Invalid GeoKey directory header".to_string()));
        }

        let num_keys = values[3] as usize;
        debug!("GeoKey directory: version={}, revision={}.{}, keys={}",
               values[0], values[1], values[2], num_keys);

        let keys: Vec<GeoKeyEntry> = values[4..]
            .chunks_exact(4)
            .take(num_keys)
            .map(|k| GeoKeyEntry::new(k[0] as u16, k[1] as u16, k[2] as u16, k[3] as u16))
            .collect();

        for key in &keys {
            debug!("GeoKey: id={} ({}), location={}, count={}, value={}",
                   key.key_id, get_key_name(key.key_id), key.tiff_tag_location, key.count, key.value_offset);
        }

        Ok(keys)
    }

    /// Builds the geotransform from ModelTransformation, or from tiepoint + pixel scale
    pub fn read_geotransform(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
    ) -> TiffResult<GeoTransform> {
        if ifd.has_tag(tags::MODEL_TRANSFORMATION_TAG) {
            let m = tiff_reader.read_tag_doubles(reader, ifd, tags::MODEL_TRANSFORMATION_TAG)?;
            if m.len() >= 8 {
                return Ok(GeoTransform::new([m[3], m[0], m[1], m[7], m[4], m[5]]));
            }
        }

        if !ifd.has_tag(tags::MODEL_PIXEL_SCALE_TAG) || !ifd.has_tag(tags::MODEL_TIEPOINT_TAG) {
            return Err(TiffError::NotGeoreferenced);
        }

        let scale = tiff_reader.read_tag_doubles(reader, ifd, tags::MODEL_PIXEL_SCALE_TAG)?;
        let tiepoint = tiff_reader.read_tag_doubles(reader, ifd, tags::MODEL_TIEPOINT_TAG)?;
        if scale.len() < 2 || tiepoint.len() < 6 {
            return Err(TiffError::NotGeoreferenced);
        }

        // Tiepoint (i, j, k, x, y, z): raster position (i, j) sits at (x, y)
        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        let (sx, sy) = (scale[0], scale[1]);
        Ok(GeoTransform::new([x - i * sx, sx, 0.0, y + j * sy, 0.0, -sy]))
    }

    /// Extract the georeferencing of an IFD
    pub fn extract_geo_info(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
    ) -> TiffResult<GeoInfo> {
        let keys = Self::parse_geo_key_directory(tiff_reader, reader, ifd)?;

        let key_value = |id: u16| keys.iter().find(|k| k.key_id == id).and_then(GeoKeyEntry::inline_value);

        let epsg_code = key_value(geo_keys::PROJECTED_CS_TYPE)
            .or_else(|| key_value(geo_keys::GEOGRAPHIC_TYPE))
            .map(u32::from)
            .filter(|code| *code != epsg::USER_DEFINED);
        let model_type = key_value(geo_keys::MODEL_TYPE);
        let raster_type = key_value(geo_keys::RASTER_TYPE).unwrap_or(raster_type::PIXEL_IS_AREA);

        let mut transform = Self::read_geotransform(tiff_reader, reader, ifd)?;

        // PixelIsPoint anchors the tiepoint at the pixel centre; move it to the corner
        if raster_type == raster_type::PIXEL_IS_POINT {
            let c = &mut transform.coefficients;
            c[0] -= 0.5 * c[1] + 0.5 * c[2];
            c[3] -= 0.5 * c[4] + 0.5 * c[5];
        }

        Ok(GeoInfo { epsg_code, model_type, raster_type, transform })
    }
}
