//! Image ingestion for PDF document generation.
//!
//! Decodes images from files, streams, byte buffers or prebuilt bitmaps
//! into an [`ImageSource`], which can be re-encoded as JPEG or as the
//! 54-byte-header bottom-up bitmap container the PDF writer embeds.

pub mod backend;
pub mod config;
pub mod encode;
pub mod error;
pub mod source;

pub use backend::ImageBackend;
pub use backend::factory::ImageSourceFactory;
pub use backend::image_rs::ImageRsBackend;
pub use error::{ImageSourceError, Result};
pub use source::ImageSource;
pub use source::pixels::{AlphaType, PixelBuffer, PixelFormat};
