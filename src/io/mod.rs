//! Low-level I/O helpers for reading raster files
//!
//! Readers are accessed through the `SeekableReader` trait so the same code
//! paths serve files on disk and in-memory buffers.

pub mod seekable;
pub mod byte_order;
