pub mod naming;
pub mod pixels;

use std::io::Write;

use tracing::debug;

use crate::config::settings::DEFAULT_QUALITY;
use crate::encode::{jpeg, pdf_bitmap};
use crate::error::ImageSourceError;
use pixels::{AlphaType, PixelBuffer};

/// A decoded image ready to be embedded in a document.
///
/// Geometry, name, quality and transparency are fixed at creation. The
/// pixel buffer is owned exclusively and released by [`ImageSource::dispose`]
/// or on drop, whichever comes first.
#[derive(Debug)]
pub struct ImageSource {
    name: String,
    width: u32,
    height: u32,
    quality: i32,
    alpha_type: AlphaType,
    pixels: Option<PixelBuffer>,
}

impl ImageSource {
    /// Wrap a decoded buffer. An empty `name` is replaced by a synthetic one.
    pub fn new(name: impl Into<String>, pixels: PixelBuffer, quality: i32) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = naming::synthetic_name();
        }

        ImageSource {
            name,
            width: pixels.width(),
            height: pixels.height(),
            quality,
            alpha_type: pixels.alpha_type(),
            pixels: Some(pixels),
        }
    }

    /// Wrap an already-decoded bitmap under a freshly generated `*{...}` name.
    ///
    /// No backend is involved: there are no encoded bytes to dispatch on.
    pub fn from_bitmap(pixels: PixelBuffer, quality: Option<i32>) -> Self {
        Self::new(
            naming::synthetic_name(),
            pixels,
            quality.unwrap_or(DEFAULT_QUALITY),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    pub fn alpha_type(&self) -> AlphaType {
        self.alpha_type
    }

    /// True unless the decoder reported the buffer as opaque.
    pub fn is_transparent(&self) -> bool {
        self.alpha_type.is_transparent()
    }

    pub fn is_disposed(&self) -> bool {
        self.pixels.is_none()
    }

    /// Borrow the pixel buffer, or fail if it was already released.
    pub fn pixels(&self) -> crate::error::Result<&PixelBuffer> {
        self.pixels.as_ref().ok_or_else(|| {
            ImageSourceError::disposed(format!("pixel buffer of '{}' was released", self.name))
        })
    }

    /// Encode the pixels as a JPEG stream at this source's quality.
    pub fn save_as_jpeg(&self) -> crate::error::Result<Vec<u8>> {
        jpeg::encode_pixel_buffer(self.pixels()?, self.quality)
    }

    /// Encode the pixels as the 54-byte-header bottom-up bitmap container.
    pub fn save_as_pdf_bitmap(&self) -> crate::error::Result<Vec<u8>> {
        pdf_bitmap::encode_pdf_bitmap(self.pixels()?)
    }

    /// Append the JPEG stream to `out`.
    pub fn write_jpeg<W: Write>(&self, out: &mut W) -> crate::error::Result<()> {
        let bytes = self.save_as_jpeg()?;
        write_all(out, &bytes, "JPEG")
    }

    /// Append the bitmap container to `out`.
    pub fn write_pdf_bitmap<W: Write>(&self, out: &mut W) -> crate::error::Result<()> {
        let bytes = self.save_as_pdf_bitmap()?;
        write_all(out, &bytes, "bitmap")
    }

    /// Release the pixel buffer.
    ///
    /// Returns `true` only for the call that actually released it; every
    /// later call is a no-op returning `false`.
    pub fn dispose(&mut self) -> bool {
        match self.pixels.take() {
            Some(pixels) => {
                debug!(
                    image = %self.name,
                    bytes = pixels.data().len(),
                    "releasing pixel buffer"
                );
                drop(pixels);
                true
            }
            None => false,
        }
    }
}

fn write_all<W: Write>(out: &mut W, bytes: &[u8], what: &str) -> crate::error::Result<()> {
    out.write_all(bytes)
        .map_err(|e| ImageSourceError::encode(format!("Failed to write {what} output: {e}")))
}
