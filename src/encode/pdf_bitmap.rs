// 54-byte-header bottom-up 32-bit bitmap container for direct PDF embedding
//
// Header layout (little-endian, all other bytes zero):
//
//   0..2   "BM"
//   2..6   file size = 54 + width * height * 4
//   10     pixel data offset = 54
//   14     info header size = 40
//   18..22 width
//   22..26 height (positive: rows are stored bottom-up)
//   26     planes = 1
//   28     bits per pixel = 32

use crate::error::ImageSourceError;
use crate::source::pixels::{PixelBuffer, buffer_len};
use tracing::trace;

pub const HEADER_LEN: usize = 54;

const SIGNATURE_OFFSET: usize = 0;
const FILE_SIZE_OFFSET: usize = 2;
const DATA_OFFSET_OFFSET: usize = 10;
const INFO_SIZE_OFFSET: usize = 14;
const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const PLANES_OFFSET: usize = 26;
const BPP_OFFSET: usize = 28;

const INFO_HEADER_LEN: u8 = 40;
const BITS_PER_PIXEL: u8 = 32;

/// Build the fixed header for a `width` x `height` image.
pub fn bitmap_header(width: u32, height: u32) -> crate::error::Result<[u8; HEADER_LEN]> {
    let file_size = buffer_len(width, height)
        .and_then(|len| len.checked_add(HEADER_LEN))
        .and_then(|len| u32::try_from(len).ok())
        .ok_or_else(|| {
            ImageSourceError::encode(format!(
                "Bitmap container size overflows u32 for {}x{} image",
                width, height
            ))
        })?;

    let mut header = [0u8; HEADER_LEN];
    header[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 2].copy_from_slice(b"BM");
    header[FILE_SIZE_OFFSET..FILE_SIZE_OFFSET + 4].copy_from_slice(&file_size.to_le_bytes());
    header[DATA_OFFSET_OFFSET] = HEADER_LEN as u8;
    header[INFO_SIZE_OFFSET] = INFO_HEADER_LEN;
    header[WIDTH_OFFSET..WIDTH_OFFSET + 4].copy_from_slice(&width.to_le_bytes());
    header[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&height.to_le_bytes());
    header[PLANES_OFFSET] = 1;
    header[BPP_OFFSET] = BITS_PER_PIXEL;
    Ok(header)
}

/// Encode a pixel buffer as a bitmap container.
///
/// Rows are copied verbatim from the top-down source, last row first.
/// The output is exactly `54 + width * height * 4` bytes.
pub fn encode_pdf_bitmap(pixels: &PixelBuffer) -> crate::error::Result<Vec<u8>> {
    let header = bitmap_header(pixels.width(), pixels.height())?;
    let total = HEADER_LEN + pixels.data().len();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&header);
    for y in (0..pixels.height()).rev() {
        out.extend_from_slice(pixels.row(y));
    }
    debug_assert_eq!(out.len(), total);

    trace!(
        width = pixels.width(),
        height = pixels.height(),
        len = out.len(),
        "encoded bitmap container"
    );
    Ok(out)
}
