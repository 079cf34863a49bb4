//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use byteorder::{LittleEndian, WriteBytesExt};

/// Extent of the test rasters: lon 76.6..77.4, lat 10.5..11.3, 0.1 degree pixels
pub const ORIGIN: (f64, f64) = (76.6, 11.3);
pub const PIXEL_SIZE: f64 = 0.1;
pub const SIZE: u32 = 8;

enum Value {
    Short(Vec<u16>),
    Long(Vec<u32>),
    Double(Vec<f64>),
}

/// Builds a little-endian, uncompressed, single-strip uint16 GeoTIFF in EPSG:4326
pub fn geotiff_u16(width: u32, height: u32, origin: (f64, f64), pixel_size: f64, pixels: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.write_u16::<LittleEndian>(42).unwrap();
    // IFD offset, patched once the pixel data is written
    out.write_u32::<LittleEndian>(0).unwrap();

    for pixel in pixels {
        out.write_u16::<LittleEndian>(*pixel).unwrap();
    }
    let strip_len = (pixels.len() * 2) as u32;

    let entries: Vec<(u16, Value)> = vec![
        (256, Value::Long(vec![width])),
        (257, Value::Long(vec![height])),
        (258, Value::Short(vec![16])),
        (259, Value::Short(vec![1])),
        (262, Value::Short(vec![1])),
        (273, Value::Long(vec![8])),
        (277, Value::Short(vec![1])),
        (278, Value::Long(vec![height])),
        (279, Value::Long(vec![strip_len])),
        (339, Value::Short(vec![1])),
        (33550, Value::Double(vec![pixel_size, pixel_size, 0.0])),
        (33922, Value::Double(vec![0.0, 0.0, 0.0, origin.0, origin.1, 0.0])),
        (34735, Value::Short(vec![1, 1, 0, 2, 1024, 0, 1, 2, 2048, 0, 1, 4326])),
    ];

    let ifd_offset = out.len() as u32;
    out[4..8].copy_from_slice(&ifd_offset.to_le_bytes());
    let mut extra_offset = ifd_offset + 2 + 12 * entries.len() as u32 + 4;
    let mut extra = Vec::new();

    out.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    for (tag, value) in &entries {
        let (field_type, count, mut data) = match value {
            Value::Short(v) => {
                let mut data = Vec::new();
                v.iter().for_each(|x| data.write_u16::<LittleEndian>(*x).unwrap());
                (3u16, v.len() as u32, data)
            }
            Value::Long(v) => {
                let mut data = Vec::new();
                v.iter().for_each(|x| data.write_u32::<LittleEndian>(*x).unwrap());
                (4u16, v.len() as u32, data)
            }
            Value::Double(v) => {
                let mut data = Vec::new();
                v.iter().for_each(|x| data.write_f64::<LittleEndian>(*x).unwrap());
                (12u16, v.len() as u32, data)
            }
        };

        out.write_u16::<LittleEndian>(*tag).unwrap();
        out.write_u16::<LittleEndian>(field_type).unwrap();
        out.write_u32::<LittleEndian>(count).unwrap();
        if data.len() <= 4 {
            data.resize(4, 0);
            out.extend_from_slice(&data);
        } else {
            out.write_u32::<LittleEndian>(extra_offset).unwrap();
            extra_offset += data.len() as u32;
            extra.extend_from_slice(&data);
        }
    }
    out.write_u32::<LittleEndian>(0).unwrap();
    out.extend_from_slice(&extra);
    out
}

/// Writes a constant-valued band raster covering the test extent
pub fn write_band(dir: &Path, name: &str, value: u16) -> PathBuf {
    let pixels = vec![value; (SIZE * SIZE) as usize];
    let path = dir.join(name);
    fs::write(&path, geotiff_u16(SIZE, SIZE, ORIGIN, PIXEL_SIZE, &pixels)).unwrap();
    path
}

/// Writes a well table with one row inside the test region and two outside
pub fn write_wells(path: &Path) {
    fs::write(
        path,
        "\
latitude,longitude,date,currentlevel,site
10.85,76.95,2023-01-15,4.0,inside
12.50,78.00,2023-01-15,6.0,north
10.85,75.00,2023-01-15,5.0,west
",
    )
    .unwrap();
}
