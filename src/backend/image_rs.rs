// image crate: encoded bytes -> PixelBuffer -> ImageSource

use std::io::{BufRead, Cursor, Read, Seek};
use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{BinaryProvider, ImageBackend, StreamProvider};
use crate::config::settings::Settings;
use crate::error::ImageSourceError;
use crate::source::ImageSource;
use crate::source::pixels::{AlphaType, PixelBuffer};

/// Production backend built on the `image` crate codecs.
///
/// Every supported input format is decoded to straight-alpha BGRA. Formats
/// without an alpha channel are reported as [`AlphaType::Opaque`].
#[derive(Debug, Clone, Default)]
pub struct ImageRsBackend {
    settings: Settings,
}

impl ImageRsBackend {
    pub const NAME: &'static str = "image-rs";

    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Sniff the format from the leading bytes and decode under the
    /// configured limits.
    fn decode_reader<R: BufRead + Seek>(
        &self,
        reader: R,
        origin: &str,
    ) -> crate::error::Result<PixelBuffer> {
        let mut reader = ImageReader::new(reader)
            .with_guessed_format()
            .map_err(|e| ImageSourceError::decode(format!("{origin}: {e}")))?;

        if reader.format().is_none() {
            return Err(ImageSourceError::decode(format!(
                "{origin}: unrecognized image format"
            )));
        }

        reader.limits(self.settings.decode_limits());
        // Input is fully buffered, so codec I/O errors mean truncated data.
        let img = reader
            .decode()
            .map_err(|e| ImageSourceError::decode(format!("{origin}: {e}")))?;
        to_pixel_buffer(img)
    }

    fn finish(&self, name: &str, pixels: PixelBuffer, quality: i32) -> ImageSource {
        debug!(
            backend = Self::NAME,
            image = name,
            width = pixels.width(),
            height = pixels.height(),
            alpha_type = ?pixels.alpha_type(),
            quality,
            "decoded image"
        );
        ImageSource::new(name, pixels, quality)
    }
}

/// Classify alpha from the decoded color type, then convert to BGRA.
fn to_pixel_buffer(img: DynamicImage) -> crate::error::Result<PixelBuffer> {
    let alpha_type = if img.color().has_alpha() {
        AlphaType::Unpremultiplied
    } else {
        AlphaType::Opaque
    };
    PixelBuffer::from_rgba_image(img.into_rgba8(), alpha_type)
}

impl ImageBackend for ImageRsBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decode_file(&self, path: &Path, quality: i32) -> crate::error::Result<ImageSource> {
        let origin = path.display().to_string();
        let data = std::fs::read(path)
            .map_err(|e| ImageSourceError::not_found(format!("{origin}: {e}")))?;

        let pixels = self.decode_reader(Cursor::new(data), &origin)?;
        Ok(self.finish(&origin, pixels, quality))
    }

    fn decode_stream(
        &self,
        name: &str,
        open: &mut StreamProvider<'_>,
        quality: i32,
    ) -> crate::error::Result<ImageSource> {
        let data = {
            let mut stream = open().map_err(|e| {
                ImageSourceError::not_found(format!("{name}: failed to open stream: {e}"))
            })?;
            let mut data = Vec::new();
            stream.read_to_end(&mut data).map_err(|e| {
                ImageSourceError::not_found(format!("{name}: failed to read stream: {e}"))
            })?;
            data
        };

        let pixels = self.decode_reader(Cursor::new(data), name)?;
        Ok(self.finish(name, pixels, quality))
    }

    fn decode_binary(
        &self,
        name: &str,
        bytes: &mut BinaryProvider<'_>,
        quality: i32,
    ) -> crate::error::Result<ImageSource> {
        let data = bytes();
        let pixels = self.decode_reader(Cursor::new(data), name)?;
        Ok(self.finish(name, pixels, quality))
    }
}
