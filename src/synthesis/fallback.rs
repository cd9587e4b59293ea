//! Low-fidelity fast synthesis profile
//!
//! A cheaper alternative to the primary pipeline: a smaller fixed canvas
//! and a coarse block grid stamped along the edges instead of the
//! strip-copy-and-soften treatment. No blur pass, no enhancement. Offered
//! as a fallback profile, not a stage of the primary pipeline.

use crate::io::codec;
use crate::io::configuration::{FAST_GRID_DIVISIONS, FAST_PROFILE_SIZE, OUTPUT_FORMAT};
use crate::io::error::Result;
use crate::raster::RasterBuffer;
use crate::synthesis::pipeline::{TextureMetadata, TextureResult};

/// Produce a tileable texture with the fast profile
///
/// The source is stretched onto a fixed `1024x1024` canvas, then each
/// block of the top edge is stamped onto the bottom edge and each block of
/// the left edge onto the right edge. Blocks are read from the canvas as
/// it mutates, so later stamps see earlier ones.
///
/// # Errors
///
/// Returns [`crate::TextureError::Encode`] if PNG serialization fails.
/// Region errors cannot occur for the fixed size and grid used here.
pub fn synthesize_fast(source: &RasterBuffer) -> Result<TextureResult> {
    let size = FAST_PROFILE_SIZE;
    let block = size / FAST_GRID_DIVISIONS;

    let mut canvas = RasterBuffer::allocate(size, size)?;
    canvas.draw_scaled(source, 0, 0, size, size);

    for index in 0..FAST_GRID_DIVISIONS {
        let offset = index * block;
        let top = canvas.read_region(offset, 0, block, block)?;
        canvas.write_region(offset, size - block, &top)?;
        let left = canvas.read_region(0, offset, block, block)?;
        canvas.write_region(size - block, offset, &left)?;
    }

    let bytes = codec::encode_png(&canvas)?;
    Ok(TextureResult {
        bytes,
        metadata: TextureMetadata {
            width: size,
            height: size,
            source_width: source.width(),
            source_height: source.height(),
            tileable: true,
            enhanced: false,
            format: OUTPUT_FORMAT,
        },
    })
}
