// Decoded raster storage: geometry, channel order, alpha classification.

use crate::error::ImageSourceError;
use image::{RgbImage, RgbaImage};

/// Bytes per pixel for every supported format.
pub const BYTES_PER_PIXEL: usize = 4;

/// Channel order of a 32-bit pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// R, G, B, A byte order.
    Rgba8,
    /// B, G, R, A byte order (native 32-bit bitmap order).
    Bgra8,
}

/// How a buffer carries transparency, as reported by the decoder.
///
/// This is a property of the format, not of the pixel values: a
/// `Premultiplied` buffer whose alpha bytes are all 255 is still
/// classified as transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaType {
    Opaque,
    Premultiplied,
    Unpremultiplied,
}

impl AlphaType {
    pub fn is_transparent(self) -> bool {
        self != AlphaType::Opaque
    }
}

/// A decoded, top-down, 4-bytes-per-pixel raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    alpha_type: AlphaType,
    data: Vec<u8>,
}

/// `width * height * 4` with overflow checking.
pub(crate) fn buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(BYTES_PER_PIXEL))
}

impl PixelBuffer {
    /// Wrap raw pixel bytes.
    ///
    /// Fails with `DecodeError` if either dimension is zero or `data` is not
    /// exactly `width * height * 4` bytes long.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        alpha_type: AlphaType,
        data: Vec<u8>,
    ) -> crate::error::Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImageSourceError::decode(format!(
                "Image dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected_len = buffer_len(width, height).ok_or_else(|| {
            ImageSourceError::decode(format!(
                "Overflow computing buffer size for {}x{} image",
                width, height
            ))
        })?;

        if data.len() != expected_len {
            return Err(ImageSourceError::decode(format!(
                "Pixel data size mismatch: expected {} bytes, got {}",
                expected_len,
                data.len()
            )));
        }

        Ok(PixelBuffer {
            width,
            height,
            format,
            alpha_type,
            data,
        })
    }

    /// Build a buffer where every pixel has the same 4 bytes.
    pub fn filled(
        width: u32,
        height: u32,
        format: PixelFormat,
        alpha_type: AlphaType,
        pixel: [u8; 4],
    ) -> crate::error::Result<Self> {
        let len = buffer_len(width, height).ok_or_else(|| {
            ImageSourceError::decode(format!(
                "Overflow computing buffer size for {}x{} image",
                width, height
            ))
        })?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Self::new(width, height, format, alpha_type, data)
    }

    /// Convert an RGBA image into a `Bgra8` buffer.
    pub fn from_rgba_image(img: RgbaImage, alpha_type: AlphaType) -> crate::error::Result<Self> {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        for px in data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
        Self::new(width, height, PixelFormat::Bgra8, alpha_type, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn alpha_type(&self) -> AlphaType {
        self.alpha_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes per row. Always a multiple of 4, so rows need no padding.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Row `y`, counted from the top.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Drop the alpha channel and return R, G, B samples.
    pub fn to_rgb_image(&self) -> crate::error::Result<RgbImage> {
        let (r, g, b) = match self.format {
            PixelFormat::Rgba8 => (0, 1, 2),
            PixelFormat::Bgra8 => (2, 1, 0),
        };
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|px| [px[r], px[g], px[b]])
            .collect();

        RgbImage::from_raw(self.width, self.height, rgb)
            .ok_or_else(|| ImageSourceError::encode("Failed to create RGB image from pixel data"))
    }
}
