//! Compression handling for TIFF files
//!
//! Decoding strategies for the compression methods band rasters use.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod lzw;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::AdobeDeflateHandler;
pub use factory::CompressionFactory;
pub use lzw::LzwHandler;
pub use zstd::ZstdHandler;
