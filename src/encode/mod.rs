pub mod jpeg;
pub mod pdf_bitmap;
