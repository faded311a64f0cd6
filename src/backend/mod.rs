pub mod factory;
pub mod image_rs;

use std::io::Read;
use std::path::Path;

use crate::source::ImageSource;

/// Opens a fresh readable byte source for a single decode.
///
/// The returned reader is owned by the decode call and dropped before the
/// call returns, on success and on failure.
pub type StreamProvider<'p> = dyn FnMut() -> std::io::Result<Box<dyn Read>> + 'p;

/// Produces a private copy of an in-memory encoded image.
///
/// The backend owns the returned buffer and drops it once decoding ends.
pub type BinaryProvider<'p> = dyn FnMut() -> Vec<u8> + 'p;

/// Decode capability behind [`ImageSource`] creation.
///
/// `quality` is already resolved by the caller and is stored verbatim on
/// the resulting source.
pub trait ImageBackend {
    /// Short identifier for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Decode the file at `path`. The source is named after the path.
    fn decode_file(&self, path: &Path, quality: i32) -> crate::error::Result<ImageSource>;

    /// Decode the stream returned by `open`.
    fn decode_stream(
        &self,
        name: &str,
        open: &mut StreamProvider<'_>,
        quality: i32,
    ) -> crate::error::Result<ImageSource>;

    /// Decode the buffer returned by `bytes`. The buffer is not retained.
    fn decode_binary(
        &self,
        name: &str,
        bytes: &mut BinaryProvider<'_>,
        quality: i32,
    ) -> crate::error::Result<ImageSource>;
}
