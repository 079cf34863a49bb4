//! Tests for header, IFD and GeoKey parsing

use std::io::Cursor;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::tags;
use crate::tiff::errors::TiffError;
use crate::tiff::geo_key_parser::GeoKeyParser;
use crate::tiff::reader::TiffReader;
use super::test_utils::{create_test_bigtiff_buffer, create_test_tiff_buffer, patch_tag_count, GeoTiffFixture, Pixels};

#[test]
fn test_read_classic_header() {
    let mut cursor = create_test_tiff_buffer();
    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();

    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.byte_order, ByteOrder::LittleEndian);
    assert_eq!(tiff.ifd_count(), 1);
    assert_eq!(tiff.main_ifd().unwrap().get_dimensions(), Some((800, 600)));
}

#[test]
fn test_read_bigtiff_header() {
    let mut cursor = create_test_bigtiff_buffer();
    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();

    assert!(tiff.is_big_tiff);
    assert!(reader.is_big_tiff());
    assert_eq!(tiff.main_ifd().unwrap().get_dimensions(), Some((1024, 768)));
}

#[test]
fn test_unsupported_version() {
    let mut cursor = Cursor::new(vec![0x49, 0x49, 41, 0, 8, 0, 0, 0]);
    let result = TiffReader::new().read(&mut cursor);
    assert!(matches!(result, Err(TiffError::UnsupportedVersion(41))));
}

#[test]
fn test_truncated_file_is_error() {
    let mut cursor = Cursor::new(vec![0x49, 0x49, 42, 0, 200, 0, 0, 0]);
    assert!(TiffReader::new().read(&mut cursor).is_err());
}

#[test]
fn test_inline_short_in_big_endian_file() {
    let mut fixture = GeoTiffFixture::utm(4, 3, (600000.0, 1200000.0), vec![1; 12]);
    fixture.big_endian = true;
    let mut cursor = fixture.cursor();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    assert_eq!(tiff.byte_order, ByteOrder::BigEndian);
    assert_eq!(ifd.get_tag_value(tags::BITS_PER_SAMPLE), Some(16));
    assert_eq!(ifd.get_dimensions(), Some((4, 3)));
    assert_eq!(reader.read_tag_values(&mut cursor, ifd, tags::BITS_PER_SAMPLE).unwrap(), vec![16]);
}

#[test]
fn test_tag_count_past_end_of_file_is_error() {
    let fixture = GeoTiffFixture::utm(4, 3, (600000.0, 1200000.0), vec![1; 12]);
    let mut buffer = fixture.build();
    patch_tag_count(&mut buffer, tags::STRIP_OFFSETS, 0xFFFF_FFF0);
    let mut cursor = Cursor::new(buffer);

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    assert!(matches!(
        reader.read_tag_values(&mut cursor, ifd, tags::STRIP_OFFSETS),
        Err(TiffError::GenericError(_))
    ));
}

#[test]
fn test_read_out_of_line_arrays() {
    let mut fixture = GeoTiffFixture::utm(4, 6, (600000.0, 1200000.0), vec![1; 24]);
    fixture.rows_per_strip = Some(2);
    fixture.nodata = Some("-9999".to_string());
    let mut cursor = fixture.cursor();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    let counts = reader.read_tag_values(&mut cursor, ifd, tags::STRIP_BYTE_COUNTS).unwrap();
    assert_eq!(counts, vec![16, 16, 16]);

    let scale = reader.read_tag_doubles(&mut cursor, ifd, tags::MODEL_PIXEL_SCALE_TAG).unwrap();
    assert_eq!(scale, vec![10.0, 10.0, 0.0]);

    assert_eq!(reader.read_tag_ascii(&mut cursor, ifd, tags::GDAL_NODATA).unwrap(), "-9999");
    assert!(matches!(
        reader.read_tag_values(&mut cursor, ifd, tags::TILE_OFFSETS),
        Err(TiffError::TagNotFound(324))
    ));
}

#[test]
fn test_geo_info_projected() {
    let fixture = GeoTiffFixture::utm(4, 4, (600000.0, 1200000.0), vec![0; 16]);
    let mut cursor = fixture.cursor();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    let keys = GeoKeyParser::parse_geo_key_directory(&reader, &mut cursor, ifd).unwrap();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[2].key_id, 3072);

    let geo = GeoKeyParser::extract_geo_info(&reader, &mut cursor, ifd).unwrap();
    assert_eq!(geo.epsg_code, Some(32643));
    assert_eq!(geo.model_type, Some(1));
    assert_eq!(geo.transform.coefficients, [600000.0, 10.0, 0.0, 1200000.0, 0.0, -10.0]);
}

#[test]
fn test_geo_info_pixel_is_point_shift() {
    let mut fixture = GeoTiffFixture::utm(4, 4, (600005.0, 1199995.0), vec![0; 16]);
    fixture.pixel_is_point = true;
    let mut cursor = fixture.cursor();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let geo = GeoKeyParser::extract_geo_info(&reader, &mut cursor, tiff.main_ifd().unwrap()).unwrap();

    assert_eq!(geo.raster_type, 2);
    assert_eq!(geo.transform.origin().x, 600000.0);
    assert_eq!(geo.transform.origin().y, 1200000.0);
}

#[test]
fn test_geo_info_geographic() {
    let fixture = GeoTiffFixture::geographic(8, 8, (76.6, 11.3), 0.1, Pixels::U8(vec![0; 64]));
    let mut cursor = fixture.cursor();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let geo = GeoKeyParser::extract_geo_info(&reader, &mut cursor, tiff.main_ifd().unwrap()).unwrap();

    assert_eq!(geo.epsg_code, Some(4326));
    assert_eq!(geo.model_type, Some(2));
}

#[test]
fn test_missing_model_tags() {
    let mut fixture = GeoTiffFixture::utm(2, 2, (0.0, 0.0), vec![0; 4]);
    fixture.model_tags = false;
    let mut cursor = fixture.cursor();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let result = GeoKeyParser::extract_geo_info(&reader, &mut cursor, tiff.main_ifd().unwrap());
    assert!(matches!(result, Err(TiffError::NotGeoreferenced)));
}
