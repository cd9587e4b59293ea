//! Bilinear sampling with edge clamping
//!
//! The fixed, deterministic resampling filter behind scaled drawing.
//! Sample positions outside the source are clamped to the nearest edge
//! pixel, so callers never need to pre-clip their coordinates.

use crate::raster::buffer::{CHANNELS, RasterBuffer};

/// Sample a source buffer at a fractional position
///
/// Returns the bilinear mix of the four surrounding pixels. Positions
/// outside the source collapse onto the nearest edge pixel.
pub fn sample_bilinear(source: &RasterBuffer, x: f64, y: f64) -> [u8; CHANNELS] {
    let max_x = source.width() - 1;
    let max_y = source.height() - 1;

    let clamped_x = x.clamp(0.0, max_x as f64);
    let clamped_y = y.clamp(0.0, max_y as f64);

    let x0 = clamped_x.floor() as usize;
    let y0 = clamped_y.floor() as usize;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let weight_x = clamped_x - x0 as f64;
    let weight_y = clamped_y - y0 as f64;

    let p00 = source.pixel(x0, y0).unwrap_or_default();
    let p10 = source.pixel(x1, y0).unwrap_or_default();
    let p01 = source.pixel(x0, y1).unwrap_or_default();
    let p11 = source.pixel(x1, y1).unwrap_or_default();

    let mut mixed = [0u8; CHANNELS];
    for (channel, slot) in mixed.iter_mut().enumerate() {
        let v00 = f64::from(p00.get(channel).copied().unwrap_or(0));
        let v10 = f64::from(p10.get(channel).copied().unwrap_or(0));
        let v01 = f64::from(p01.get(channel).copied().unwrap_or(0));
        let v11 = f64::from(p11.get(channel).copied().unwrap_or(0));

        let top = v00.mul_add(1.0 - weight_x, v10 * weight_x);
        let bottom = v01.mul_add(1.0 - weight_x, v11 * weight_x);
        let value = top.mul_add(1.0 - weight_y, bottom * weight_y);

        *slot = value.round().clamp(0.0, 255.0) as u8;
    }
    mixed
}
