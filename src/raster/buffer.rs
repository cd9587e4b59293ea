//! In-memory RGBA pixel grid with get/set region operations
//!
//! The buffer is the unit of exchange between pipeline stages: decoding
//! produces one, every transform mutates one in place, and encoding
//! consumes one. All channel values stay within `[0, 255]` by construction
//! and the backing array length is always `width * height * 4`.

use crate::io::error::{Result, TextureError};
use image::RgbaImage;
use ndarray::{Array3, ArrayViewMut1, Axis, s};

use crate::raster::resample;

/// Number of channels per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// Dense row-major RGBA pixel grid
///
/// Backed by an `ndarray` of shape `(height, width, 4)`. Both dimensions
/// are at least 1; zero-sized buffers are rejected at every constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    data: Array3<u8>,
}

impl RasterBuffer {
    /// Allocate a zero-initialized buffer
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidDimension`] if either dimension is 0.
    pub fn allocate(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimension { width, height });
        }
        Ok(Self {
            data: Array3::zeros((height, width, CHANNELS)),
        })
    }

    /// Build a buffer from a decoded RGBA image
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidDimension`] for zero-sized images and
    /// [`TextureError::Decode`] if the pixel data does not match the
    /// declared dimensions.
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimension { width, height });
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), image.as_raw().clone())
            .map_err(|e| TextureError::Decode {
                reason: format!("pixel data does not match {width}x{height}: {e}"),
            })?;
        Ok(Self { data })
    }

    /// Convert the buffer into an RGBA image for encoding
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Encode`] if the pixel array cannot back an
    /// image of the buffer's dimensions.
    pub fn to_image(&self) -> Result<RgbaImage> {
        let raw: Vec<u8> = self.data.iter().copied().collect();
        RgbaImage::from_raw(self.width() as u32, self.height() as u32, raw).ok_or_else(|| {
            TextureError::Encode {
                reason: format!(
                    "pixel array does not back a {}x{} image",
                    self.width(),
                    self.height()
                ),
            }
        })
    }

    /// Width of the buffer in pixels
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Height of the buffer in pixels
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Allocate a zero-initialized buffer with the same dimensions
    pub fn zeroed_like(&self) -> Self {
        Self {
            data: Array3::zeros(self.data.dim()),
        }
    }

    /// Read one pixel, or `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; CHANNELS]> {
        let r = *self.data.get((y, x, 0))?;
        let g = *self.data.get((y, x, 1))?;
        let b = *self.data.get((y, x, 2))?;
        let a = *self.data.get((y, x, 3))?;
        Some([r, g, b, a])
    }

    /// Write one pixel; coordinates outside the buffer are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [u8; CHANNELS]) {
        for (channel, value) in pixel.iter().enumerate() {
            if let Some(slot) = self.data.get_mut((y, x, channel)) {
                *slot = *value;
            }
        }
    }

    /// Iterate over all channel values in row-major R,G,B,A order
    pub fn channels(&self) -> impl Iterator<Item = &u8> {
        self.data.iter()
    }

    /// Mutably iterate over all channel values in row-major R,G,B,A order
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut u8> {
        self.data.iter_mut()
    }

    /// Mutably iterate over pixels as 4-channel lanes
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = ArrayViewMut1<'_, u8>> {
        self.data.lanes_mut(Axis(2)).into_iter()
    }

    /// Return a detached copy of a sub-rectangle
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidDimension`] for zero-sized rectangles
    /// and [`TextureError::OutOfBounds`] if the rectangle is not fully
    /// contained in the buffer.
    pub fn read_region(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimension { width, height });
        }
        self.check_bounds(x, y, width, height)?;
        let view = self.data.slice(s![y..y + height, x..x + width, ..]);
        Ok(Self {
            data: view.to_owned(),
        })
    }

    /// Overwrite a sub-rectangle with the contents of `region`
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::OutOfBounds`] if the target rectangle is not
    /// fully contained in the buffer.
    pub fn write_region(&mut self, x: usize, y: usize, region: &Self) -> Result<()> {
        let width = region.width();
        let height = region.height();
        self.check_bounds(x, y, width, height)?;
        self.data
            .slice_mut(s![y..y + height, x..x + width, ..])
            .assign(&region.data);
        Ok(())
    }

    /// Resample `source` into the destination rectangle with bilinear
    /// filtering
    ///
    /// The whole source image is stretched to the destination rectangle;
    /// destination coordinates outside the buffer are clipped rather than
    /// rejected. Zero-sized destination rectangles draw nothing.
    pub fn draw_scaled(
        &mut self,
        source: &Self,
        dest_x: i64,
        dest_y: i64,
        dest_width: usize,
        dest_height: usize,
    ) {
        if dest_width == 0 || dest_height == 0 {
            return;
        }
        let clip_x0 = dest_x.max(0);
        let clip_y0 = dest_y.max(0);
        let clip_x1 = (dest_x + dest_width as i64).min(self.width() as i64);
        let clip_y1 = (dest_y + dest_height as i64).min(self.height() as i64);

        for y in clip_y0..clip_y1 {
            for x in clip_x0..clip_x1 {
                // Map the destination pixel center back into source space
                let source_x = ((x - dest_x) as f64 + 0.5) * source.width() as f64
                    / dest_width as f64
                    - 0.5;
                let source_y = ((y - dest_y) as f64 + 0.5) * source.height() as f64
                    / dest_height as f64
                    - 0.5;
                let pixel = resample::sample_bilinear(source, source_x, source_y);
                self.set_pixel(x as usize, y as usize, pixel);
            }
        }
    }

    fn check_bounds(&self, x: usize, y: usize, width: usize, height: usize) -> Result<()> {
        let fits_x = x.checked_add(width).is_some_and(|right| right <= self.width());
        let fits_y = y
            .checked_add(height)
            .is_some_and(|bottom| bottom <= self.height());
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(TextureError::OutOfBounds {
                x,
                y,
                width,
                height,
                buffer_width: self.width(),
                buffer_height: self.height(),
            })
        }
    }
}
