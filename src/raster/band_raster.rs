//! Read-only access to one single-band GeoTIFF
//!
//! A `BandRaster` owns its reader; the file is closed when the raster is
//! dropped.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, SeekFrom};
use std::path::Path;
use log::{debug, warn};

use crate::compression::CompressionFactory;
use crate::coordinate::{CoordinateSystem, CoordinateSystemFactory, GeoTransform, PointSet};
use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{predictor, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::geo_key_parser::{GeoInfo, GeoKeyParser};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::tiff::validation;

use super::decode;
use super::layout::{BlockShape, RasterLayout};

/// No-data value when the raster does not declare one
pub const DEFAULT_NODATA: f64 = 0.0;

/// An opened band raster, ready to be sampled
pub struct BandRaster<R: SeekableReader> {
    reader: R,
    byte_order: ByteOrder,
    is_big_tiff: bool,
    ifd_count: usize,
    overview_count: usize,
    file_size: u64,
    geo: GeoInfo,
    crs: CoordinateSystem,
    nodata: f64,
    layout: RasterLayout,
    /// Last decoded block, keyed by block index
    cached_block: Option<(usize, Vec<u8>)>,
}

impl BandRaster<BufReader<File>> {
    /// Opens a GeoTIFF file
    pub fn open<P: AsRef<Path>>(path: P) -> TiffResult<Self> {
        let path = path.as_ref();
        debug!("Opening band raster {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: SeekableReader> BandRaster<R> {
    /// Parses headers, georeferencing and layout of the first image
    pub fn from_reader(mut reader: R) -> TiffResult<Self> {
        let mut tiff_reader = TiffReader::new();
        let tiff = tiff_reader.read(&mut reader)?;
        let ifd = tiff.main_ifd()
            .ok_or_else(|| TiffError::GenericError("No IFDs found in TIFF file".to_string()))?;

        let geo = GeoKeyParser::extract_geo_info(&tiff_reader, &mut reader, ifd)?;
        let epsg = geo.epsg_code.ok_or(TiffError::NotGeoreferenced)?;
        let crs = CoordinateSystemFactory::from_epsg(epsg);
        let nodata = read_nodata(&tiff_reader, &mut reader, ifd);
        let layout = RasterLayout::from_ifd(&tiff_reader, &mut reader, ifd)?;

        // Fail at open time rather than on the first sample
        CompressionFactory::create_handler(layout.compression)?;

        let file_size = validation::get_file_size(&mut reader)?;

        debug!("Raster {}x{} {} in {}, nodata {}",
               layout.width, layout.height, layout.sample_type, crs.description(), nodata);

        Ok(BandRaster {
            reader,
            byte_order: tiff.byte_order,
            is_big_tiff: tiff.is_big_tiff,
            ifd_count: tiff.ifd_count(),
            overview_count: tiff.overviews().len(),
            file_size,
            geo,
            crs,
            nodata,
            layout,
            cached_block: None,
        })
    }

    pub fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    pub fn nodata(&self) -> f64 {
        self.nodata
    }

    pub fn transform(&self) -> GeoTransform {
        self.geo.transform
    }

    pub fn dimensions(&self) -> (u64, u64) {
        (self.layout.width, self.layout.height)
    }

    /// Samples the nearest pixel under every point
    ///
    /// The set is reprojected into the raster CRS first when needed. Points
    /// outside the grid yield the no-data value. The result has one value
    /// per point, in input order.
    pub fn sample(&mut self, points: &PointSet) -> TiffResult<Vec<f64>> {
        let projected = points.reproject(self.crs)?;
        let transform = self.geo.transform;
        let (width, height) = self.dimensions();

        let mut values = Vec::with_capacity(projected.len());
        let mut outside = 0;
        for point in projected.points() {
            let value = match transform.to_pixel_index(point, width, height) {
                Some((col, row)) => self.pixel_value(col, row)?,
                None => {
                    outside += 1;
                    self.nodata
                }
            };
            values.push(value);
        }

        if outside > 0 {
            debug!("{} of {} points fall outside the raster extent", outside, projected.len());
        }
        Ok(values)
    }

    /// Value of the first sample of pixel (col, row)
    pub fn pixel_value(&mut self, col: u64, row: u64) -> TiffResult<f64> {
        if col >= self.layout.width || row >= self.layout.height {
            return Err(TiffError::GenericError(format!(
                "Pixel ({}, {}) outside {}x{} raster", col, row, self.layout.width, self.layout.height
            )));
        }

        let position = self.layout.locate(col, row);
        let sample_bytes = self.layout.sample_type.bytes();
        let start = ((position.row * position.width + position.col) * self.layout.pixel_stride()) as usize
            * sample_bytes;

        let sample_type = self.layout.sample_type;
        let byte_order = self.byte_order;
        let block_len = self.layout.block_len(&position);
        let block = self.block(position.index, block_len, position.width)?;

        let bytes = block.get(start..start + sample_bytes).ok_or_else(|| {
            TiffError::GenericError(format!("Block {} too short for pixel ({}, {})", position.index, col, row))
        })?;
        Ok(decode::read_sample(bytes, sample_type, byte_order))
    }

    /// Returns a decoded block, reading it unless it is the cached one
    fn block(&mut self, index: usize, expected_len: usize, block_width: u64) -> TiffResult<&[u8]> {
        let cached = matches!(&self.cached_block, Some((cached, _)) if *cached == index);
        if !cached {
            let data = self.read_block(index, expected_len, block_width)?;
            self.cached_block = Some((index, data));
        }

        match &self.cached_block {
            Some((_, data)) => Ok(data.as_slice()),
            None => Err(TiffError::GenericError(format!("Block {} not loaded", index))),
        }
    }

    fn read_block(&mut self, index: usize, expected_len: usize, block_width: u64) -> TiffResult<Vec<u8>> {
        let offset = self.layout.offsets[index];
        let byte_count = self.layout.byte_counts[index];
        validation::validate_block(offset, byte_count, self.file_size)?;

        debug!("Reading block {} at offset {} with {} bytes", index, offset, byte_count);

        let mut compressed = vec![0u8; byte_count as usize];
        self.reader.seek(SeekFrom::Start(offset))?;
        self.reader.read_exact(&mut compressed)?;

        let handler = CompressionFactory::create_handler(self.layout.compression)?;
        let mut data = handler.decompress(&compressed, expected_len)?;
        if data.len() < expected_len {
            warn!("Block {} decoded to {} bytes, expected {}", index, data.len(), expected_len);
        }

        if self.layout.predictor == predictor::HORIZONTAL_DIFFERENCING as u64 {
            let stride = self.layout.pixel_stride() as usize;
            decode::undo_horizontal_predictor(
                &mut data,
                self.layout.sample_type,
                self.byte_order,
                block_width as usize * stride,
                stride,
            );
        }

        Ok(data)
    }

    /// Summary of the raster for display
    pub fn summary(&self) -> RasterSummary {
        RasterSummary {
            width: self.layout.width,
            height: self.layout.height,
            sample_type: self.layout.sample_type.to_string(),
            samples_per_pixel: self.layout.samples_per_pixel,
            compression: CompressionFactory::create_handler(self.layout.compression)
                .map(|h| h.name().to_string())
                .unwrap_or_else(|_| format!("code {}", self.layout.compression)),
            layout: match self.layout.shape {
                BlockShape::Strips { rows_per_strip } => format!("strips of {} rows", rows_per_strip),
                BlockShape::Tiles { width, height } => format!("tiles of {}x{}", width, height),
            },
            byte_order: self.byte_order.name(),
            is_big_tiff: self.is_big_tiff,
            ifd_count: self.ifd_count,
            overview_count: self.overview_count,
            crs: self.crs.description(),
            geo: self.geo.clone(),
            nodata: self.nodata,
        }
    }
}

/// Reads the GDAL_NODATA tag, falling back to the default value
fn read_nodata(tiff_reader: &TiffReader, reader: &mut dyn SeekableReader, ifd: &IFD) -> f64 {
    if !ifd.has_tag(tags::GDAL_NODATA) {
        return DEFAULT_NODATA;
    }

    match tiff_reader.read_tag_ascii(reader, ifd, tags::GDAL_NODATA) {
        Ok(text) => text.trim().parse::<f64>().unwrap_or_else(|_| {
            warn!("Ignoring unparseable GDAL_NODATA value '{}'", text.trim());
            DEFAULT_NODATA
        }),
        Err(e) => {
            warn!("Could not read GDAL_NODATA tag: {}", e);
            DEFAULT_NODATA
        }
    }
}

/// Human-readable description of an opened raster
#[derive(Debug, Clone)]
pub struct RasterSummary {
    pub width: u64,
    pub height: u64,
    pub sample_type: String,
    pub samples_per_pixel: u64,
    pub compression: String,
    pub layout: String,
    pub byte_order: &'static str,
    pub is_big_tiff: bool,
    pub ifd_count: usize,
    pub overview_count: usize,
    pub crs: String,
    pub geo: GeoInfo,
    pub nodata: f64,
}

impl fmt::Display for RasterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Format: {}", if self.is_big_tiff { "BigTIFF" } else { "TIFF" })?;
        writeln!(f, "  Byte order: {}", self.byte_order)?;
        writeln!(f, "  IFDs: {} ({} overviews)", self.ifd_count, self.overview_count)?;
        writeln!(f, "  Dimensions: {}x{}", self.width, self.height)?;
        writeln!(f, "  Samples: {} x {}", self.samples_per_pixel, self.sample_type)?;
        writeln!(f, "  Compression: {}", self.compression)?;
        writeln!(f, "  Layout: {}", self.layout)?;
        writeln!(f, "  CRS: {}", self.crs)?;
        write!(f, "{}", self.geo)?;
        writeln!(f, "  NoData: {}", self.nodata)
    }
}
