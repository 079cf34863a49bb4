//! TIFF file reader implementation
//!
//! Reads the header and IFD chain of a TIFF/BigTIFF file and provides typed
//! access to tag values. Byte order is handled by the strategy selected from
//! the header marker.

use log::{debug, warn};
use std::io::{Cursor, SeekFrom};

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{field_types, header};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::TIFF;
use crate::tiff::validation;

/// Upper bound on the IFD chain length, guards against offset loops
const MAX_IFDS: usize = 100;

/// Reader for TIFF and BigTIFF directory structures
pub struct TiffReader {
    /// Byte order handler, set once the header has been read
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Whether the current file is BigTIFF
    is_big_tiff: bool,
    /// Size of the current file, bounds every out-of-line tag read
    file_size: u64,
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new() -> Self {
        TiffReader {
            byte_order_handler: None,
            is_big_tiff: false,
            file_size: u64::MAX,
        }
    }

    /// Returns the byte order handler, or an error if no header was read yet
    pub fn handler(&self) -> TiffResult<&dyn ByteOrderHandler> {
        self.byte_order_handler
            .as_deref()
            .ok_or_else(|| TiffError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Returns whether the current file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }

    /// Reads the header and the full IFD chain
    ///
    /// 1. Detect byte order (little/big endian)
    /// 2. Check for TIFF or BigTIFF format
    /// 3. Read all IFDs
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> TiffResult<TIFF> {
        reader.seek(SeekFrom::Start(0))?;

        let byte_order = ByteOrder::detect(reader)?;
        debug!("Detected byte order: {}", byte_order.name());
        self.byte_order_handler = Some(byte_order.create_handler());

        self.is_big_tiff = self.detect_format(reader)?;

        let first_ifd_offset = self.read_offset(reader)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = validation::get_file_size(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)?;
        self.file_size = file_size;

        let mut tiff = TIFF::new(self.is_big_tiff, byte_order);
        tiff.ifds = self.read_ifd_chain(reader, first_ifd_offset, file_size)?;

        debug!("Read {} IFDs", tiff.ifds.len());
        Ok(tiff)
    }

    /// Reads the version field and returns whether the file is BigTIFF
    fn detect_format(&self, reader: &mut dyn SeekableReader) -> TiffResult<bool> {
        let handler = self.handler()?;
        let version = handler.read_u16(reader)?;

        match version {
            header::BIG_TIFF_VERSION => {
                validation::validate_bigtiff_header(reader, handler)?;
                Ok(true)
            }
            header::TIFF_VERSION => Ok(false),
            _ => Err(TiffError::UnsupportedVersion(version)),
        }
    }

    /// Reads a file offset (4 bytes for TIFF, 8 for BigTIFF)
    fn read_offset(&self, reader: &mut dyn SeekableReader) -> TiffResult<u64> {
        let handler = self.handler()?;
        if self.is_big_tiff {
            Ok(handler.read_u64(reader)?)
        } else {
            Ok(handler.read_u32(reader)? as u64)
        }
    }

    /// Reads a chain of IFDs starting from the given offset
    ///
    /// A broken link ends the chain with a warning; only a broken first IFD
    /// is an error.
    fn read_ifd_chain(
        &self,
        reader: &mut dyn SeekableReader,
        first_ifd_offset: u64,
        file_size: u64,
    ) -> TiffResult<Vec<IFD>> {
        let mut ifds = Vec::new();
        let mut ifd_offset = first_ifd_offset;

        while ifd_offset != 0 && ifds.len() < MAX_IFDS {
            if ifd_offset >= file_size {
                warn!("IFD offset {} exceeds file size {}, stopping IFD chain", ifd_offset, file_size);
                break;
            }

            let ifd = match self.read_ifd(reader, ifd_offset, ifds.len()) {
                Ok(ifd) => ifd,
                Err(e) if ifds.is_empty() => return Err(e),
                Err(e) => {
                    warn!("Error reading IFD {}: {}", ifds.len(), e);
                    break;
                }
            };

            // The reader now sits right after the last entry, at the next-IFD link
            let next_ifd_offset = match self.read_offset(reader) {
                Ok(offset) => offset,
                Err(e) => {
                    warn!("Error reading next IFD offset: {}", e);
                    ifds.push(ifd);
                    break;
                }
            };

            ifds.push(ifd);

            if next_ifd_offset != 0 && (next_ifd_offset >= file_size || next_ifd_offset < 8) {
                warn!("Invalid next IFD offset: {}, stopping IFD chain", next_ifd_offset);
                break;
            }
            ifd_offset = next_ifd_offset;
        }

        Ok(ifds)
    }

    /// Reads one IFD located at `offset`
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> TiffResult<IFD> {
        reader.seek(SeekFrom::Start(offset))?;

        let handler = self.handler()?;
        let entry_count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u16(reader)? as u64
        };
        debug!("IFD #{} at {} has {} entries", number, offset, entry_count);

        let mut ifd = IFD::new(number, offset);
        for _ in 0..entry_count {
            ifd.add_entry(self.read_ifd_entry(reader)?);
        }

        Ok(ifd)
    }

    /// Reads a single IFD entry
    ///
    /// The value field is kept as raw bytes. When the data fits inline the
    /// first value is decoded into `value_offset`, honoring the byte order so
    /// that a big-endian SHORT is not mistaken for a shifted LONG.
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> TiffResult<IFDEntry> {
        let handler = self.handler()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        let field_len = if self.is_big_tiff { 8 } else { 4 };
        let mut inline = [0u8; 8];
        reader.read_exact(&mut inline[..field_len])?;

        let mut entry = IFDEntry::new(tag, field_type, count, 0);
        entry.inline = inline;

        let mut field = Cursor::new(&inline[..field_len]);
        entry.value_offset = if entry.is_value_inline(self.is_big_tiff) {
            read_integer(&mut field, field_type, handler).unwrap_or(0)
        } else if self.is_big_tiff {
            handler.read_u64(&mut field)?
        } else {
            handler.read_u32(&mut field)? as u64
        };

        Ok(entry)
    }

    /// Reads all values of an integer-typed tag
    pub fn read_tag_values(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> TiffResult<Vec<u64>> {
        let entry = ifd.get_entry(tag).ok_or(TiffError::TagNotFound(tag))?;
        let handler = self.handler()?;

        self.with_entry_data(reader, entry, |source| {
            let mut values = Vec::with_capacity(entry.count as usize);
            for _ in 0..entry.count {
                values.push(read_integer(source, entry.field_type, handler)?);
            }
            Ok(values)
        })
    }

    /// Reads all values of a floating point tag (DOUBLE, FLOAT or integer types)
    pub fn read_tag_doubles(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> TiffResult<Vec<f64>> {
        let entry = ifd.get_entry(tag).ok_or(TiffError::TagNotFound(tag))?;
        let handler = self.handler()?;

        self.with_entry_data(reader, entry, |source| {
            let mut values = Vec::with_capacity(entry.count as usize);
            for _ in 0..entry.count {
                let value = match entry.field_type {
                    field_types::DOUBLE => handler.read_f64(source)?,
                    field_types::FLOAT => handler.read_f32(source)? as f64,
                    other => read_integer(source, other, handler)? as f64,
                };
                values.push(value);
            }
            Ok(values)
        })
    }

    /// Reads an ASCII tag, dropping trailing NUL terminators
    pub fn read_tag_ascii(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> TiffResult<String> {
        let entry = ifd.get_entry(tag).ok_or(TiffError::TagNotFound(tag))?;

        self.with_entry_data(reader, entry, |source| {
            let mut buffer = vec![0u8; entry.count as usize];
            source.read_exact(&mut buffer)?;
            while buffer.last() == Some(&0) {
                buffer.pop();
            }
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        })
    }

    /// Runs `read` against the entry's data, inline or at its file offset
    ///
    /// Out-of-line data must lie inside the file, so a corrupt count fails
    /// here instead of driving a huge allocation.
    fn with_entry_data<T>(
        &self,
        reader: &mut dyn SeekableReader,
        entry: &IFDEntry,
        read: impl FnOnce(&mut dyn SeekableReader) -> TiffResult<T>,
    ) -> TiffResult<T> {
        let data_len = entry.data_len().ok_or_else(|| {
            TiffError::GenericError(format!("Tag {} count {} overflows", entry.tag, entry.count))
        })?;
        if !entry.is_value_inline(self.is_big_tiff) {
            validation::validate_block(entry.value_offset, data_len, self.file_size)?;
        }

        if entry.is_value_inline(self.is_big_tiff) {
            let mut inline = Cursor::new(&entry.inline[..]);
            read(&mut inline)
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            read(reader)
        }
    }
}

/// Reads one integer value of the given field type, widened to u64
///
/// Signed types are reinterpreted bit-for-bit; callers only use this for
/// counts, offsets and codes, which are never negative.
fn read_integer(
    source: &mut dyn SeekableReader,
    field_type: u16,
    handler: &dyn ByteOrderHandler,
) -> TiffResult<u64> {
    let value = match field_type {
        field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED | field_types::ASCII => {
            let mut byte = [0u8; 1];
            source.read_exact(&mut byte)?;
            byte[0] as u64
        }
        field_types::SHORT | field_types::SSHORT => handler.read_u16(source)? as u64,
        field_types::LONG | field_types::SLONG | field_types::FLOAT => handler.read_u32(source)? as u64,
        field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => handler.read_u64(source)?,
        _ => return Err(TiffError::UnsupportedFieldType(field_type)),
    };

    Ok(value)
}
