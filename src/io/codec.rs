//! Image decoding and lossless PNG encoding
//!
//! The only seam between the pipeline's pixel grid and the `image` crate.
//! Decoding accepts any format the crate recognizes; encoding is always
//! lossless PNG so a decode of the output reproduces the exact pixel grid.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use crate::io::error::{Result, TextureError};
use crate::raster::RasterBuffer;

/// Decode encoded image bytes into a raster buffer
///
/// # Errors
///
/// Returns [`TextureError::Decode`] for empty, truncated, or otherwise
/// unreadable image data.
pub fn decode(bytes: &[u8]) -> Result<RasterBuffer> {
    if bytes.is_empty() {
        return Err(TextureError::Decode {
            reason: "empty image data".to_string(),
        });
    }
    let image = image::load_from_memory(bytes).map_err(|e| TextureError::Decode {
        reason: e.to_string(),
    })?;
    RasterBuffer::from_image(&image.to_rgba8())
}

/// Encode a raster buffer as lossless PNG bytes
///
/// # Errors
///
/// Returns [`TextureError::Encode`] if the PNG writer fails.
pub fn encode_png(buffer: &RasterBuffer) -> Result<Vec<u8>> {
    let image = buffer.to_image()?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| TextureError::Encode {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

/// Load and decode an image file into a raster buffer
///
/// # Errors
///
/// Returns [`TextureError::ImageLoad`] if the file cannot be opened or is
/// not a recognizable image, and [`TextureError::InvalidDimension`] for
/// zero-sized images.
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<RasterBuffer> {
    let path_buf = path.as_ref().to_path_buf();
    let image = image::open(&path_buf).map_err(|e| TextureError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    RasterBuffer::from_image(&image.to_rgba8())
}
