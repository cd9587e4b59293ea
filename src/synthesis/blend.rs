//! Edge-wrap blending for seamless tiling
//!
//! Stamps wrap-matched border strips so the canvas repeats without a hard
//! seam, then softens the stamped transitions with a low-opacity blurred
//! composite. The softening pass trades a slight overall loss of sharpness
//! for a cheap, branch-free seam treatment.

use crate::io::configuration::{SEAM_BLUR_RADIUS, SEAM_SOFTEN_WEIGHT};
use crate::io::error::{Result, invalid_configuration};
use crate::raster::buffer::{CHANNELS, RasterBuffer};

/// Makes a canvas tile seamlessly when repeated in both axes
///
/// Not idempotent: every application composites another blurred copy over
/// the canvas, so repeated runs keep softening the image.
#[derive(Debug, Clone, Copy)]
pub struct EdgeWrapBlender {
    blend_width: usize,
}

impl EdgeWrapBlender {
    /// Create a blender with the given border strip width
    pub const fn new(blend_width: usize) -> Self {
        Self { blend_width }
    }

    /// Width of the border strips used for seam matching
    pub const fn blend_width(&self) -> usize {
        self.blend_width
    }

    /// Stamp wrap-matched borders and soften the transitions in place
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextureError::InvalidConfiguration`] if the strip
    /// width is 0 or exceeds half the shorter canvas edge.
    pub fn apply(&self, buffer: &mut RasterBuffer) -> Result<()> {
        let width = buffer.width();
        let height = buffer.height();
        let edge = width.min(height);

        if self.blend_width == 0 {
            return Err(invalid_configuration(
                "blend_width",
                &self.blend_width,
                &"must be at least 1",
            ));
        }
        if self.blend_width * 2 > edge {
            return Err(invalid_configuration(
                "blend_width",
                &self.blend_width,
                &format!("must be at most half the canvas edge ({edge})"),
            ));
        }

        // Both strips are sampled before either write so the right edge
        // receives pristine left-edge pixels, not the stamped corner.
        let top = buffer.read_region(0, 0, width, self.blend_width)?;
        let left = buffer.read_region(0, 0, self.blend_width, height)?;
        buffer.write_region(0, height - self.blend_width, &top)?;
        buffer.write_region(width - self.blend_width, 0, &left)?;

        soften(buffer, SEAM_BLUR_RADIUS, SEAM_SOFTEN_WEIGHT);
        Ok(())
    }
}

// Composites a blurred copy back over the canvas at a fixed low opacity,
// smoothing the stamped transitions without erasing interior detail.
fn soften(buffer: &mut RasterBuffer, radius: usize, weight: f64) {
    let horizontal = blur_pass(buffer, radius, true);
    let blurred = blur_pass(&horizontal, radius, false);

    for (original, blur) in buffer.channels_mut().zip(blurred.channels()) {
        let mixed = f64::from(*original).mul_add(1.0 - weight, f64::from(*blur) * weight);
        *original = mixed.round().clamp(0.0, 255.0) as u8;
    }
}

// One axis of the separable box blur, clamping samples at the canvas edge.
fn blur_pass(source: &RasterBuffer, radius: usize, horizontal: bool) -> RasterBuffer {
    let width = source.width();
    let height = source.height();
    let window = 2 * radius + 1;
    let mut output = source.zeroed_like();

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f64; CHANNELS];
            for offset in 0..window {
                let delta = offset as i64 - radius as i64;
                let (sample_x, sample_y) = if horizontal {
                    ((x as i64 + delta).clamp(0, width as i64 - 1) as usize, y)
                } else {
                    (x, (y as i64 + delta).clamp(0, height as i64 - 1) as usize)
                };
                let pixel = source.pixel(sample_x, sample_y).unwrap_or_default();
                for (sum, value) in sums.iter_mut().zip(pixel.iter()) {
                    *sum += f64::from(*value);
                }
            }

            let mut averaged = [0u8; CHANNELS];
            for (slot, sum) in averaged.iter_mut().zip(sums.iter()) {
                *slot = (sum / window as f64).round().clamp(0.0, 255.0) as u8;
            }
            output.set_pixel(x, y, averaged);
        }
    }
    output
}
