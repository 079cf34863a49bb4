//! Seekable reader trait
//!
//! Raster parsing jumps between the header, IFDs, tag data and pixel blocks,
//! so every reader used by the crate must support both reading and seeking.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
