//! Per-pixel local contrast boost
//!
//! A fixed linear gain on the color channels, not frequency-domain detail
//! synthesis. Kept as its own named transform so the pipeline reads as
//! what it is.

use crate::io::configuration::DETAIL_GAIN;
use crate::raster::buffer::{CHANNELS, RasterBuffer};

/// Multiplies R, G and B by a fixed gain, clamped to 255
///
/// The alpha channel is never touched. Pure and order-independent across
/// pixels. Infallible: buffer shape invariants are enforced by
/// [`RasterBuffer`] construction, so there is no malformed input to reject.
#[derive(Debug, Clone, Copy)]
pub struct DetailEnhancer {
    gain: f64,
}

impl Default for DetailEnhancer {
    fn default() -> Self {
        Self::new(DETAIL_GAIN)
    }
}

impl DetailEnhancer {
    /// Create an enhancer with the given channel gain
    pub const fn new(gain: f64) -> Self {
        Self { gain }
    }

    /// Gain factor applied to each color channel
    pub const fn gain(&self) -> f64 {
        self.gain
    }

    /// Boost the color channels of every pixel in place
    pub fn apply(&self, buffer: &mut RasterBuffer) {
        for mut pixel in buffer.pixels_mut() {
            for value in pixel.iter_mut().take(CHANNELS - 1) {
                *value = boost(*value, self.gain);
            }
        }
    }
}

fn boost(value: u8, gain: f64) -> u8 {
    let scaled = (f64::from(value) * gain).round();
    scaled.clamp(0.0, 255.0) as u8
}
