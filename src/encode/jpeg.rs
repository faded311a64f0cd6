// image crate: pixel buffer -> JPEG bytes

use crate::error::ImageSourceError;
use crate::source::pixels::PixelBuffer;
use image::RgbImage;
use std::io::Cursor;
use tracing::trace;

/// JPEG Start-Of-Image marker.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Map a stored quality value onto the encoder's 1-100 scale.
///
/// Values outside 0-100 are rejected rather than clamped. 0 selects the
/// encoder's lowest setting.
pub fn encoder_quality(quality: i32) -> crate::error::Result<u8> {
    if !(0..=100).contains(&quality) {
        return Err(ImageSourceError::encode(format!(
            "JPEG quality must be 0-100, got {}",
            quality
        )));
    }
    Ok(quality.max(1) as u8)
}

/// Encode a decoded pixel buffer to JPEG bytes.
///
/// The alpha channel is dropped; channel order is taken from the buffer's
/// [`PixelFormat`](crate::source::pixels::PixelFormat).
///
/// # Arguments
/// * `pixels`  - Decoded 32-bit pixels
/// * `quality` - JPEG quality (0 = worst, 100 = best)
pub fn encode_pixel_buffer(pixels: &PixelBuffer, quality: i32) -> crate::error::Result<Vec<u8>> {
    let quality = encoder_quality(quality)?;
    let rgb = pixels.to_rgb_image()?;
    let bytes = encode_rgb_to_jpeg(&rgb, quality)?;

    trace!(
        width = pixels.width(),
        height = pixels.height(),
        quality,
        len = bytes.len(),
        "encoded JPEG"
    );
    Ok(bytes)
}

/// Encode an already-converted RGB image to JPEG bytes.
pub(crate) fn encode_rgb_to_jpeg(rgb: &RgbImage, quality: u8) -> crate::error::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| ImageSourceError::encode(format!("JPEG encode failed: {e}")))?;

    Ok(buf.into_inner())
}
